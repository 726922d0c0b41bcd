//! CLI parse and command tests.

mod fix_check;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}
