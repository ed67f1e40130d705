// Thin binary wrapper: all logic lives in the library's cli module.

fn main() -> miette::Result<()> {
    echotest::cli::run()
}
