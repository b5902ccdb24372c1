use quad_demo::{Demo, DemoConfig, logging};

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("failed to initialize logger: {err}");
    }

    let config = DemoConfig::default();
    let demo = match Demo::new(&config) {
        Ok(demo) => demo,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(-1);
        }
    };

    demo.run();
}
