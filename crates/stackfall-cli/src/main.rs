mod command;
mod input;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
