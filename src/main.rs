// SPDX-License-Identifier: MPL-2.0
use player_overlay::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        platform: args.opt_value_from_str("--platform").unwrap_or_else(|err| {
            eprintln!("ignoring --platform: {err}");
            None
        }),
        config_dir: args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
            eprintln!("ignoring --config-dir: {err}");
            None
        }),
        auto_pip: args.contains("--auto-pip"),
    };

    for extra in args.finish() {
        eprintln!("ignoring unexpected argument: {}", extra.to_string_lossy());
    }

    app::run(flags)
}
