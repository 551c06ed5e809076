use anyhow::Result;

fn main() -> Result<()> {
    ashpath::cli::run()
}
