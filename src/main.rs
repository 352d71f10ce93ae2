use jormungand::run;

fn main() -> anyhow::Result<()> {
    // Every database call is awaited in order; one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run())
}
