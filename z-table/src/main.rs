//! oracle-z-table: regenerate the committee z-table embedded in the
//! oracle contracts.

use clap::{Parser, ValueEnum};

use oracle_z_table::{
    generate, render_json, render_rust, ZTableConfig, ZTableError, DEFAULT_COMMITTEE_SIZE,
    DEFAULT_MAX_STAKE,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// A `pub const Z_TABLE` declaration
    Rust,
    /// Config and entries as a JSON document
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "oracle-z-table")]
#[command(about = "Generate the committee z-table for the oracle contracts")]
struct Args {
    /// Number of table entries
    #[arg(long, default_value_t = oracle_common::committee::Z_TABLE_SIZE)]
    size: usize,

    /// z-score covered by the last bucket
    #[arg(long, default_value_t = oracle_common::committee::Z_TABLE_MAX_Z)]
    max_z: u64,

    /// Reference total stake of the network
    #[arg(long, default_value_t = DEFAULT_MAX_STAKE)]
    max_stake: u64,

    /// Expected committee size at the reference stake
    #[arg(long, default_value_t = DEFAULT_COMMITTEE_SIZE)]
    committee_size: u64,

    #[arg(long, value_enum, default_value_t = Format::Rust)]
    format: Format,
}

fn main() -> Result<(), ZTableError> {
    let args = Args::parse();
    let config = ZTableConfig {
        size: args.size,
        max_z: args.max_z,
        max_stake: args.max_stake,
        committee_size: args.committee_size,
    };

    let table = generate(&config)?;
    let rendered = match args.format {
        Format::Rust => render_rust(&table),
        Format::Json => render_json(&config, &table)?,
    };
    println!("{}", rendered);
    Ok(())
}
