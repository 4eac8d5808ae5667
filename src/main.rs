// SPDX-License-Identifier: MPL-2.0
use iced_skybar::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        scale: args.opt_value_from_str("--scale").unwrap_or(None),
        fov: args.opt_value_from_str("--fov").unwrap_or(None),
    };

    app::run(flags)
}
