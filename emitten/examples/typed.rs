use emitten::{Error, EventName, Listener, Result, TypedEmitter};
use tracing::Level;

const CONNECTED: EventName<str> = EventName::new("connected");
const RECEIVED: EventName<[u8]> = EventName::new("received");
const CLOSED: EventName<(u16, bool)> = EventName::new("closed");

fn main() -> Result {
    tracing_subscriber::fmt().with_max_level(Level::TRACE).init();

    let socket = TypedEmitter::new();

    socket.once(
        CONNECTED,
        Listener::new(|peer: &str| println!("connected to {peer}")),
    );
    socket.on(
        RECEIVED,
        Listener::fallible(|bytes: &[u8]| {
            let text = std::str::from_utf8(bytes).map_err(Error::listener)?;
            println!("received {text:?}");
            Ok(())
        }),
    );
    let closed = socket.disposable(
        CLOSED,
        Listener::new(|(code, clean): &(u16, bool)| println!("closed {code} (clean: {clean})")),
    );

    socket.emit(CONNECTED, "127.0.0.1:9000")?;
    socket.emit(RECEIVED, &b"ping"[..])?;

    // A failing listener stops the emit and hands the error back
    if let Err(e) = socket.emit(RECEIVED, &[0xff_u8, 0xfe][..]) {
        println!("emit failed: {e}");
    }

    socket.emit(CLOSED, &(1000, true))?;
    closed.dispose();
    socket.emit(CLOSED, &(1006, false))?;

    socket.empty();
    assert!(socket.is_empty());
    Ok(())
}
