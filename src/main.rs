use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    softrt::run(softrt::Args::parse())?;
    Ok(())
}
