use hashspgemm::{
    row_nnz_upper_bound, spgemm_numeric_with_rownnz, HashType, RowNnzMode, SparseMatrixCSR,
    SpgemmConfig,
};

/// 1D Poisson operator `tridiag(-1, 2, -1)`
fn laplacian_1d(n: usize) -> SparseMatrixCSR<f64> {
    let mut row_ptr = Vec::with_capacity(n + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();

    row_ptr.push(0);
    for i in 0..n {
        if i > 0 {
            col_idx.push(i - 1);
            values.push(-1.0);
        }
        col_idx.push(i);
        values.push(2.0);
        if i + 1 < n {
            col_idx.push(i + 1);
            values.push(-1.0);
        }
        row_ptr.push(col_idx.len());
    }

    SparseMatrixCSR::new(n, n, row_ptr, col_idx, values)
}

fn main() {
    env_logger::init();

    let tag = std::env::args()
        .nth(1)
        .and_then(|s| s.chars().next())
        .unwrap_or('L');
    let hash_type = match HashType::try_from(tag) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("hashspgemm {}: numeric SpGEMM with two-tier hash accumulation", hashspgemm::VERSION);

    let a = laplacian_1d(8);
    println!("\nMatrix A:");
    println!("{:?}", a);

    let config = SpgemmConfig {
        sort_columns: true,
        ..SpgemmConfig::with_hash_type(hash_type)
    };
    println!("\nConfiguration:");
    println!("  Hash type: {}", config.hash_type);
    println!("  Fast table capacity: {}", config.fast_capacity);
    println!("  Lane shape: {}x{}", config.lane_shape.x, config.lane_shape.y);
    println!("  Max lane groups: {}", config.max_groups);

    let mut row_count = match row_nnz_upper_bound(&a, &a) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!("\nRow nnz upper bounds: {:?}", row_count);

    match spgemm_numeric_with_rownnz(&a, &a, &mut row_count, RowNnzMode::UpperBound, &config) {
        Ok(out) => {
            println!("Exact row nnz:        {:?}", row_count);
            println!("Compacted: {}, nnz: {}", out.compacted, out.nnz);
            println!("\nA * A:");
            println!("{:?}", out.matrix);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
