use emitten::{Emitter, Listener, Result};

fn main() -> Result {
    // RUST_LOG=emitten=trace shows every registration and emit
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let emitter = Emitter::<&'static str, str>::new();

    // Persistent listener, runs on every emit
    let greet = Listener::new(|name: &str| println!("Hello, {name}!"));
    emitter.on("greet", greet.clone());

    // One-shot listener, runs on the next emit only
    emitter.once("greet", Listener::new(|_: &str| println!("(nice to meet you)")));

    emitter.emit("greet", "World")?;
    emitter.emit("greet", "again")?;

    emitter.off("greet", &greet);
    emitter.emit("greet", "nobody")?;

    println!("active events: {:?}", emitter.active_events());
    Ok(())
}
