use emitten::{Emitter, Listener, Result, Subscriptions};

#[derive(Debug, Clone)]
enum Progress {
    Started { total: u64 },
    Chunk { received: u64 },
    Finished,
}

/// Fires its own progress events; callers may only listen.
struct Download {
    events: Emitter<&'static str, Progress>,
    total: u64,
}

impl Download {
    fn new(total: u64) -> Self {
        Self {
            events: Emitter::new(),
            total,
        }
    }

    fn events(&self) -> Subscriptions<&'static str, Progress> {
        self.events.subscriptions()
    }

    fn run(&self, chunk: u64) -> Result {
        self.events.emit("progress", &Progress::Started { total: self.total })?;

        let mut received = 0;
        while received < self.total {
            received = (received + chunk).min(self.total);
            self.events.emit("progress", &Progress::Chunk { received })?;
        }

        self.events.emit("done", &Progress::Finished)
    }
}

fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let download = Download::new(1_000);
    let events = download.events();

    let total = std::cell::Cell::new(0);
    let report = Listener::new(move |p: &Progress| match p {
        Progress::Started { total: t } => total.set(*t),
        Progress::Chunk { received } => {
            println!("{:>3}%", received * 100 / total.get().max(1))
        }
        Progress::Finished => {}
    });
    let dispose = events.disposable("progress", report);
    events.once("done", Listener::new(|_: &Progress| println!("download complete")));

    download.run(250)?;

    dispose.dispose();
    println!("still listening to: {:?}", events.active_events());
    Ok(())
}
