use clap::{value_parser, Arg, ArgAction, Command};

/// Arguments shared by every subcommand
fn codec_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("input")
                .help("Input file ('-' for stdin)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("nsym")
                .short('n')
                .long("nsym")
                .help("Number of error correction symbols per block")
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            Arg::new("exponent")
                .short('m')
                .long("exponent")
                .help("Galois field exponent, symbols are m-bit (1-8)")
                .value_name("BITS")
                .value_parser(value_parser!(u32).range(1..=8))
                .default_value("8"),
        )
        .arg(
            Arg::new("block-size")
                .short('b')
                .long("block-size")
                .help("Data symbols per block (0 = largest the field allows)")
                .value_name("SYMBOLS")
                .value_parser(value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .help("Number of CPU threads for computation (0 = auto-detect)")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("no-parallel")
                .long("no-parallel")
                .help("Disable all parallel processing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("hex")
                .long("hex")
                .help("Encoded data is hex text instead of raw bytes")
                .action(ArgAction::SetTrue),
        )
}

fn output_arg() -> Arg {
    Arg::new("output")
        .help("Output file ('-' for stdout)")
        .default_value("-")
        .index(2)
}

pub fn build_cli() -> Command {
    Command::new("rsecc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reed-Solomon error correction over GF(2^m)")
        .arg_required_else_help(true)
        .subcommand(
            codec_args(Command::new("encode").visible_alias("e"))
                .about("Append error correction symbols to a file")
                .arg(output_arg()),
        )
        .subcommand(
            codec_args(Command::new("decode").visible_alias("d"))
                .about("Correct an encoded file and strip its check symbols")
                .arg(output_arg())
                .arg(
                    Arg::new("erasures")
                        .short('e')
                        .long("erasures")
                        .help("Known-bad positions in the encoded data")
                        .value_name("POS")
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            codec_args(Command::new("check").visible_alias("c"))
                .about("Check an encoded file for corruption (exit code 1 if corrupted)"),
        )
}
