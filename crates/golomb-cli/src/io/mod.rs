// crates/golomb-cli/src/io/mod.rs

pub mod elements;

use std::fs::File;
use std::io::{self, Read, Write};

use anyhow::Context;

/// Open the input path for reading; `-` selects standard input.
pub fn open_input(path: &str) -> anyhow::Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file = File::open(path).with_context(|| format!("open input: {path}"))?;
        Ok(Box::new(file))
    }
}

/// Open the output path for writing; `-` selects standard output.
pub fn open_output(path: &str) -> anyhow::Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(io::stdout().lock()))
    } else {
        let file = File::create(path).with_context(|| format!("open output: {path}"))?;
        Ok(Box::new(file))
    }
}
