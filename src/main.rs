use std::fs::File;
use std::io::BufReader;

use log::{error, info};
use mmcrs::{read_matrix_market, ReaderConfig};

fn main() {
    pretty_env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: mmcrs <file.mtx>");
            std::process::exit(2);
        }
    };

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            error!("{}: {}", path, e);
            std::process::exit(1);
        }
    };

    match read_matrix_market(BufReader::new(file), &ReaderConfig::default()) {
        Ok((header, matrix)) => {
            info!("header: {}", header);
            info!(
                "{} x {} matrix with {} nonzeros",
                matrix.num_rows,
                matrix.num_columns,
                matrix.nnz()
            );
            println!("{:?}", matrix);
        }
        Err(e) => {
            error!("{}: {}", path, e);
            std::process::exit(1);
        }
    }
}
