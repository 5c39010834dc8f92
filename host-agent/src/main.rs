fn main() -> anyhow::Result<()> {
    host_agent::run()
}
