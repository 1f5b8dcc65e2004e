use domain::customer::{Address, Customer};
use domain::product::Product;
use domain::{register_default_handlers, EventDispatcher, Isolated, Notifier};
use log::*;
use service::{config::Config, logging::Logger};

fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    let dispatcher = EventDispatcher::new();
    register_default_handlers(&dispatcher);

    let result = if config.isolate_handler_failures {
        run(&Isolated(&dispatcher))
    } else {
        run(&dispatcher)
    };

    if let Err(e) = result {
        error!("Domain event run failed: {e}");
        std::process::exit(1);
    }
}

fn new_address() -> Address {
    Address {
        street: "New Street".to_string(),
        number: "2".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        country: "Brasil".to_string(),
    }
}

/// Drives the entities, which raise their events through `notifier`.
///
/// With a plain dispatcher the first handler failure stops the run. Through
/// `Isolated` every handler of an event runs and the failures are logged first.
fn run(notifier: &impl Notifier) -> Result<(), domain::error::Error> {
    let product = Product::create(notifier, "Product 1", "Product 1 description", 10.0)?;
    info!("Product {} created", product.id());

    let mut customer = Customer::create(notifier, "123", "Customer 1")?;
    customer.change_address(notifier, new_address())?;
    info!("Customer {} moved to {}", customer.id(), new_address().city);

    Ok(())
}
