/*
 * Copyright 2020 Nikhil Marathe <nsm.nikhil@gmail.com>
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use anyhow::bail;
use pico_args::Arguments;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use genrule::{parse_binding, parse_file_group, run, Config};

const HELP: &str = "\
usage: genrule [options] --cmd TEMPLATE

options:
  --name NAME                      rule name [default: genrule]
  -o, --out FILE                   declared output (repeatable)
  -s, --src LABEL                  source reference (repeatable)
  -t, --tool LABEL                 tool reference (repeatable)
  -f, --tool-file LABEL            tool file reference (repeatable)
  --depfile                        the command writes a depfile
  --var NAME=VALUE                 define $(NAME) (repeatable)
  --provide-tool LABEL=PATH        resolve LABEL to a host tool
  --provide-files LABEL=PATH,...   resolve LABEL to a group of files
  -d MODE                          debugging modes: directives, deps
  -v, --verbose                    log more (also see RUST_LOG)
  -h, --help                       print this help
";

fn parse_config(args: &mut Arguments) -> Result<Config, pico_args::Error> {
    Ok(Config {
        name: args
            .opt_value_from_str("--name")?
            .unwrap_or_else(|| "genrule".to_owned()),
        command: args.value_from_str("--cmd")?,
        outputs: args.values_from_str(["-o", "--out"])?,
        sources: args.values_from_str(["-s", "--src"])?,
        tools: args.values_from_str(["-t", "--tool"])?,
        tool_files: args.values_from_str(["-f", "--tool-file"])?,
        depfile: args.contains("--depfile"),
        variables: args.values_from_fn("--var", parse_binding)?,
        provided_tools: args.values_from_fn("--provide-tool", parse_binding)?,
        provided_files: args.values_from_fn("--provide-files", parse_file_group)?,
        debug_modes: args.values_from_str("-d")?,
    })
}

fn main() -> anyhow::Result<()> {
    let mut args = Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let level = if args.contains(["-v", "--verbose"]) {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = parse_config(&mut args)?;
    let rest = args.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {:?}", rest);
    }
    run(config)
}
