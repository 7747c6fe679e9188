// crates/golomb-cli/src/cmd/encode.rs

use std::io::{BufReader, BufWriter, Read, Write};

use clap::Args;
use golomb_core::{AdaptiveEncoder, ByteSink, CodeValue, Encoder, SignedValue};

use crate::cmd::Format;
use crate::io::elements::Element;
use crate::io::{open_input, open_output};

#[derive(Args)]
pub struct EncodeArgs {
    /// Input element format.
    #[arg(short, long, value_enum, default_value_t = Format::U8)]
    pub format: Format,

    /// Initial order; must be smaller than the element width.
    #[arg(short = 'k', long = "order", default_value_t = 0)]
    pub order: u32,

    /// Smoothing factor; enables adaptive mode. Decode must use the same
    /// factor.
    #[arg(short = 'a', long = "adaptive")]
    pub adaptive: Option<u32>,

    /// Input path; '-' reads standard input.
    pub input: String,

    /// Output path; '-' writes standard output.
    pub output: String,
}

pub fn run(args: EncodeArgs) -> anyhow::Result<()> {
    let width = args.format.width();
    anyhow::ensure!(
        args.order < width,
        "order {} does not fit {} bit elements",
        args.order,
        width
    );
    if let Some(a) = args.adaptive {
        anyhow::ensure!(a < width, "adaptive factor {} does not fit {} bit elements", a, width);
    }

    let reader = BufReader::new(open_input(&args.input)?);
    let writer = BufWriter::new(open_output(&args.output)?);

    let (values, units) = match args.format {
        Format::U8 => encode_unsigned::<u8, _, _>(reader, writer, &args)?,
        Format::I8 => encode_signed::<i8, _, _>(reader, writer, &args)?,
        Format::U16 => encode_unsigned::<u16, _, _>(reader, writer, &args)?,
        Format::I16 => encode_signed::<i16, _, _>(reader, writer, &args)?,
        Format::U32 => encode_unsigned::<u32, _, _>(reader, writer, &args)?,
        Format::I32 => encode_signed::<i32, _, _>(reader, writer, &args)?,
        Format::U64 => encode_unsigned::<u64, _, _>(reader, writer, &args)?,
        Format::I64 => encode_signed::<i64, _, _>(reader, writer, &args)?,
    };

    let adaptive = match args.adaptive {
        Some(a) => a.to_string(),
        None => "off".to_string(),
    };
    eprintln!(
        "encode ok: format={:?} values={} out_bytes={} k={} adaptive={}",
        args.format, values, units, args.order, adaptive
    );
    Ok(())
}

fn encode_unsigned<V, R, W>(mut reader: R, writer: W, args: &EncodeArgs) -> anyhow::Result<(u64, u64)>
where
    V: CodeValue + Element,
    R: Read,
    W: Write,
{
    let mut sink = ByteSink::new(writer);
    let mut count = 0u64;

    match args.adaptive {
        Some(factor) => {
            let mut enc = AdaptiveEncoder::<V, u8, _>::new(&mut sink, args.order, factor)?;
            while let Some(value) = V::read_from(&mut reader)? {
                enc.push(value)?;
                count += 1;
            }
            enc.flush()?;
        }
        None => {
            let mut enc = Encoder::<V, u8, _>::new(&mut sink, args.order)?;
            while let Some(value) = V::read_from(&mut reader)? {
                enc.push(value)?;
                count += 1;
            }
            enc.flush()?;
        }
    }

    let written = sink.written();
    sink.into_inner().flush()?;
    Ok((count, written))
}

fn encode_signed<T, R, W>(mut reader: R, writer: W, args: &EncodeArgs) -> anyhow::Result<(u64, u64)>
where
    T: SignedValue + Element,
    R: Read,
    W: Write,
{
    let mut sink = ByteSink::new(writer);
    let mut count = 0u64;

    match args.adaptive {
        Some(factor) => {
            let mut enc = AdaptiveEncoder::<T::Unsigned, u8, _>::new(&mut sink, args.order, factor)?;
            while let Some(value) = T::read_from(&mut reader)? {
                enc.push_signed(value)?;
                count += 1;
            }
            enc.flush()?;
        }
        None => {
            let mut enc = Encoder::<T::Unsigned, u8, _>::new(&mut sink, args.order)?;
            while let Some(value) = T::read_from(&mut reader)? {
                enc.push_signed(value)?;
                count += 1;
            }
            enc.flush()?;
        }
    }

    let written = sink.written();
    sink.into_inner().flush()?;
    Ok((count, written))
}
