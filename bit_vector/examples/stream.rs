//! Stream-mode walkthrough: appending across growth, detaching, string
//! conversion and self-append.

use bit_vector::{BitVector, Mode};

const VEC_SIZE: usize = 64;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut array = BitVector::new(Mode::Array, VEC_SIZE)?;
    let mut stream = BitVector::new(Mode::Stream, 0)?;

    array.print()?;
    stream.print()?;

    for i in [0, 2, 3, 10, 2] {
        array.set(i)?;
    }
    stream.append_bit(true)?;

    array.print()?;
    stream.print()?;

    array.clear(0)?;
    array.resize(4)?;
    array.print()?;

    for _ in 0..3 {
        stream.append_bit(true)?;
    }
    stream.print()?;

    stream.append_bit(true)?;
    stream.print()?;

    println!("detached {}", u8::from(stream.detach_bit()?));
    println!(
        "stream holds {} of {} bits",
        stream.len(),
        stream.capacity_bits()
    );

    stream.append_self(0)?;
    stream.print()?;

    let text = BitVector::from_bit_str("111000")?;
    println!("{}", text.to_bit_string());

    Ok(())
}
