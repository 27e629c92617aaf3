//! Array-mode walkthrough: set, clear, shrink, then save to a file and read
//! it back.
//!
//! ```text
//! cargo run --example array -- [path]
//! ```

use bit_vector::{BitVector, BitVectorError, Mode};
use byte_store::Storage;
use std::path::PathBuf;

const VEC_SIZE: usize = 64;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("array_test"));

    let mut array = BitVector::new(Mode::Array, VEC_SIZE)?;
    println!("init");
    array.print()?;

    for i in [0, 2, 10, 12, 63] {
        array.set(i)?;
    }
    println!("set 5 entries");
    array.print()?;

    array.clear(0)?;
    array.clear(63)?;
    println!("clear 2 entries");
    array.print()?;

    array.resize(8)?;
    println!("resize");
    array.print()?;
    println!("Index 2: {}", array.get(2)?);

    match array.get(8) {
        Err(e @ BitVectorError::IndexOutOfBounds(..)) => println!("Index 8: {}", e),
        other => println!("Index 8: unexpected {:?}", other),
    }

    let mut storage = Storage::create_file(&path)?;
    let end = array.serialize(&mut storage, 0)?;
    storage.flush()?;
    println!("wrote {} bytes to {}", end, path.display());

    let storage = Storage::open_file(&path)?;
    let (read_back, _) = BitVector::deserialize(&storage, 0)?;

    println!("read_vec");
    read_back.print()?;
    println!("array_vec");
    array.print()?;

    Ok(())
}
