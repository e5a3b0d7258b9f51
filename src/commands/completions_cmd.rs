use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::commands::base_commands::CliArgs;

pub fn completions_command<W: Write>(shell: Shell, out: &mut W) {
    let mut command = CliArgs::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, out);
}
