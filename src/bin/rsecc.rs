//! rsecc binary - protect files with Reed-Solomon check symbols

use anyhow::{Context, Result};
use log::info;
use rsecc::{BlockCodec, CodecConfig};
use std::io::{Read, Write};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = rsecc::build_cli().get_matches();

    match matches.subcommand() {
        Some(("encode", sub_matches)) => handle_encode(sub_matches),
        Some(("decode", sub_matches)) => handle_decode(sub_matches),
        Some(("check", sub_matches)) => handle_check(sub_matches),
        _ => {
            eprintln!("Error: No command specified");
            eprintln!("\nUse 'rsecc --help' for usage information");
            std::process::exit(1);
        }
    }
}

fn block_codec(matches: &clap::ArgMatches) -> Result<BlockCodec> {
    let config = CodecConfig::from_args(matches);
    BlockCodec::from_config(&config).context("Invalid codec parameters")
}

fn read_input(matches: &clap::ArgMatches) -> Result<Vec<u8>> {
    let path = matches
        .get_one::<String>("input")
        .context("No input file given")?;

    if path == "-" {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("Failed to read stdin")?;
        Ok(data)
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read {}", path))
    }
}

/// Read encoded data, decoding hex text if requested
fn read_encoded(matches: &clap::ArgMatches) -> Result<Vec<u8>> {
    let data = read_input(matches)?;
    if matches.get_flag("hex") {
        let text = String::from_utf8(data).context("Hex input is not valid UTF-8")?;
        hex::decode(text.trim()).context("Invalid hex input")
    } else {
        Ok(data)
    }
}

fn write_output(matches: &clap::ArgMatches, data: &[u8]) -> Result<()> {
    let path = matches.get_one::<String>("output").map_or("-", String::as_str);

    if path == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(data).context("Failed to write stdout")?;
        stdout.flush().context("Failed to flush stdout")
    } else {
        std::fs::write(path, data).with_context(|| format!("Failed to write {}", path))
    }
}

fn handle_encode(matches: &clap::ArgMatches) -> Result<()> {
    let codec = block_codec(matches)?;
    let data = read_input(matches)?;

    let encoded = codec.encode(&data).context("Encoding failed")?;
    info!(
        "Encoded {} bytes into {} bytes ({} per block)",
        data.len(),
        encoded.len(),
        codec.codeword_len()
    );

    if matches.get_flag("hex") {
        let mut text = hex::encode(&encoded);
        text.push('\n');
        write_output(matches, text.as_bytes())
    } else {
        write_output(matches, &encoded)
    }
}

fn handle_decode(matches: &clap::ArgMatches) -> Result<()> {
    let codec = block_codec(matches)?;
    let encoded = read_encoded(matches)?;
    let erasures: Vec<usize> = matches
        .get_many::<usize>("erasures")
        .map(|values| values.copied().collect())
        .unwrap_or_default();

    let decoded = codec
        .decode_with_erasures(&encoded, &erasures)
        .context("Decoding failed")?;

    if !decoded.corrected_blocks.is_empty() {
        eprintln!(
            "Corrected {} errors and {} erasures in {} of {} blocks",
            decoded.errors_found,
            decoded.erasures,
            decoded.corrected_blocks.len(),
            decoded.blocks
        );
    }

    write_output(matches, &decoded.data)
}

fn handle_check(matches: &clap::ArgMatches) -> Result<()> {
    let codec = block_codec(matches)?;
    let encoded = read_encoded(matches)?;
    anyhow::ensure!(!encoded.is_empty(), "Input is empty");

    if codec.is_corrupted(&encoded) {
        println!("Corrupted");
        std::process::exit(1);
    }

    println!("OK");
    Ok(())
}
