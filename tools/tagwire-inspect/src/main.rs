// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! tagwire-inspect - Show the tag layer of a tagwire frame
//!
//! Reads a frame from a hex argument, a file or stdin and reports which
//! namespace and tag it selects plus the payload size. Payload contents
//! are opaque to this tool; only the prefix is interpreted.

use clap::Parser;
use colored::*;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tagwire::WireTag;

/// Inspect the tag prefix of a tagwire frame
#[derive(Parser, Debug)]
#[command(name = "tagwire-inspect")]
#[command(version = "0.1.0")]
#[command(about = "Inspect the tag prefix of a tagwire frame")]
struct Args {
    /// Frame as hex text (e.g. "ff01deadbeef"); omit to read raw bytes from --input or stdin
    frame: Option<String>,

    /// Read the raw frame from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Maximum payload bytes shown in the hex preview
    #[arg(short, long, default_value = "16")]
    preview: usize,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let frame = read_frame(args)?;
    let (wire_tag, payload) = WireTag::read(&frame)?;

    let namespace = match wire_tag {
        WireTag::Core(_) => "core".green(),
        WireTag::Custom(_) => "custom".yellow(),
    };

    println!("namespace: {namespace}");
    println!("tag:       {:#04x} ({})", wire_tag.tag(), wire_tag.tag());
    println!("prefix:    {} byte(s)", wire_tag.encoded_len());
    println!("payload:   {} byte(s)", payload.len());
    if !payload.is_empty() && args.preview > 0 {
        println!("preview:   {}", hex_preview(payload, args.preview));
    }

    Ok(())
}

fn read_frame(args: &Args) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(hex) = &args.frame {
        return parse_hex(hex);
    }
    if let Some(path) = &args.input {
        return Ok(fs::read(path)?);
    }
    let mut raw = Vec::new();
    io::stdin().read_to_end(&mut raw)?;
    Ok(raw)
}

/// Parse hex text into bytes. Accepts an optional `0x` prefix plus spaces
/// and underscores between digits.
fn parse_hex(text: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let cleaned: String = text
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();

    if cleaned.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", cleaned.len()).into());
    }

    let mut bytes = Vec::with_capacity(cleaned.len() / 2);
    for pair in cleaned.as_bytes().chunks(2) {
        let pair = std::str::from_utf8(pair)?;
        let byte =
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex digits '{pair}'"))?;
        bytes.push(byte);
    }
    Ok(bytes)
}

fn hex_preview(payload: &[u8], limit: usize) -> String {
    let shown = payload.len().min(limit);
    let mut out = String::with_capacity(shown * 3 + 2);
    for (i, byte) in payload[..shown].iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    if payload.len() > shown {
        out.push_str(" ..");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_variants() {
        assert_eq!(parse_hex("ff01").unwrap(), vec![0xFF, 0x01]);
        assert_eq!(parse_hex("0xFF01").unwrap(), vec![0xFF, 0x01]);
        assert_eq!(parse_hex("ff 01 aa").unwrap(), vec![0xFF, 0x01, 0xAA]);
        assert_eq!(parse_hex("ff_01").unwrap(), vec![0xFF, 0x01]);
        assert!(parse_hex("f").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn test_hex_preview_truncates() {
        assert_eq!(hex_preview(&[0xDE, 0xAD], 16), "de ad");
        assert_eq!(hex_preview(&[1, 2, 3, 4], 2), "01 02 ..");
    }
}
