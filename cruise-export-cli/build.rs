use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command surface in src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("cruise-export")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export dataset records into cruise documents")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("export")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("format").long("format").value_hint(ValueHint::Other))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("formats")
                .arg(Arg::new("locale").long("locale").value_hint(ValueHint::Other))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "cruise-export", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "cruise-export", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "cruise-export", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
