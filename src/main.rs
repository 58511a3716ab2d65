fn main() -> anyhow::Result<()> {
    colorsense::run()
}
