// crates/golomb-cli/src/cmd/decode.rs

use std::io::{BufReader, BufWriter, Read, Write};

use clap::Args;
use golomb_core::{AdaptiveDecoder, ByteSource, CodeValue, Decoder, SignedValue};

use crate::cmd::Format;
use crate::io::elements::Element;
use crate::io::{open_input, open_output};

#[derive(Args)]
pub struct DecodeArgs {
    /// Output element format; must match what the stream was encoded with.
    #[arg(short, long, value_enum, default_value_t = Format::U8)]
    pub format: Format,

    /// Order the stream was encoded with.
    #[arg(short = 'k', long = "order", default_value_t = 0)]
    pub order: u32,

    /// Smoothing factor the stream was encoded with, if adaptive.
    #[arg(short = 'a', long = "adaptive")]
    pub adaptive: Option<u32>,

    /// Input path; '-' reads standard input.
    pub input: String,

    /// Output path; '-' writes standard output.
    pub output: String,
}

pub fn run(args: DecodeArgs) -> anyhow::Result<()> {
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
        Format::U8 => decode_unsigned::<u8, _, _>(reader, writer, &args)?,
        Format::I8 => decode_signed::<i8, _, _>(reader, writer, &args)?,
        Format::U16 => decode_unsigned::<u16, _, _>(reader, writer, &args)?,
        Format::I16 => decode_signed::<i16, _, _>(reader, writer, &args)?,
        Format::U32 => decode_unsigned::<u32, _, _>(reader, writer, &args)?,
        Format::I32 => decode_signed::<i32, _, _>(reader, writer, &args)?,
        Format::U64 => decode_unsigned::<u64, _, _>(reader, writer, &args)?,
        Format::I64 => decode_signed::<i64, _, _>(reader, writer, &args)?,
    };

    let adaptive = match args.adaptive {
        Some(a) => a.to_string(),
        None => "off".to_string(),
    };
    eprintln!(
        "decode ok: format={:?} values={} in_bytes={} k={} adaptive={}",
        args.format, values, units, args.order, adaptive
    );
    Ok(())
}

fn decode_unsigned<V, R, W>(reader: R, writer: W, args: &DecodeArgs) -> anyhow::Result<(u64, u64)>
where
    V: CodeValue + Element,
    R: Read,
    W: Write,
{
    let source = ByteSource::new(reader);
    let mut writer = writer;
    let mut count = 0u64;

    let fetched = match args.adaptive {
        Some(factor) => {
            let mut dec = AdaptiveDecoder::<V, u8, _>::new(source, args.order, factor)?;
            while let Some(value) = dec.pull()? {
                value.write_to(&mut writer)?;
                count += 1;
            }
            dec.into_inner().fetched()
        }
        None => {
            let mut dec = Decoder::<V, u8, _>::new(source, args.order)?;
            while let Some(value) = dec.pull()? {
                value.write_to(&mut writer)?;
                count += 1;
            }
            dec.into_inner().fetched()
        }
    };

    writer.flush()?;
    Ok((count, fetched))
}

fn decode_signed<T, R, W>(reader: R, writer: W, args: &DecodeArgs) -> anyhow::Result<(u64, u64)>
where
    T: SignedValue + Element,
    R: Read,
    W: Write,
{
    let source = ByteSource::new(reader);
    let mut writer = writer;
    let mut count = 0u64;

    let fetched = match args.adaptive {
        Some(factor) => {
            let mut dec =
                AdaptiveDecoder::<T::Unsigned, u8, _>::new(source, args.order, factor)?;
            while let Some(value) = dec.pull_signed()? {
                value.write_to(&mut writer)?;
                count += 1;
            }
            dec.into_inner().fetched()
        }
        None => {
            let mut dec = Decoder::<T::Unsigned, u8, _>::new(source, args.order)?;
            while let Some(value) = dec.pull_signed()? {
                value.write_to(&mut writer)?;
                count += 1;
            }
            dec.into_inner().fetched()
        }
    };

    writer.flush()?;
    Ok((count, fetched))
}
