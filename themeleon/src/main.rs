fn main() -> anyhow::Result<()> {
    themeleon::run_cli()
}
