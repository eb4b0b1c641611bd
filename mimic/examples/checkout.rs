use mimic::{reporters::TracingReporter, *};

// The dependency the code under test talks to
trait PaymentGateway {
    fn quote(&self, cart: u64) -> u32;
    fn charge(&self, cart: u64, cents: u32) -> impl Future<Output = Result<String>> + Send;
}

// A substitute: one spy per method
struct GatewaySpy {
    quote: Spy<(u64,), u32, Plain>,
    charge: Spy<(u64, u32), String, SuspendingThrowing>,
}

impl PaymentGateway for GatewaySpy {
    fn quote(&self, cart: u64) -> u32 {
        self.quote.resolve((cart,))
    }

    fn charge(&self, cart: u64, cents: u32) -> impl Future<Output = Result<String>> + Send {
        self.charge.resolve_throwing_async((cart, cents))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("card declined")]
struct Declined;

// The code under test
async fn checkout(gateway: &impl PaymentGateway, cart: u64) -> Result<String> {
    let total = gateway.quote(cart);
    gateway.charge(cart, total).await
}

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Log verification failures instead of panicking
    let config = Config::default().with_reporter(TracingReporter);
    let gateway = GatewaySpy {
        quote: Spy::with_config("quote", config.clone()),
        charge: Spy::with_config("charge", config),
    };

    when(gateway.quote.any()).then_return_with(|(cart,)| (*cart as u32) * 100);
    when(gateway.charge.with((ArgMatcher::any(), ArgMatcher::gt(1_000)))).then_throw(Declined);
    when(gateway.charge.any()).then_return_with(|(cart, cents)| format!("receipt {cart}/{cents}"));

    println!("{}", checkout(&gateway, 7).await?);
    if let Err(e) = checkout(&gateway, 42).await {
        println!("checkout failed: {e}");
    }

    verify(gateway.quote.any()).called_times(2);
    verify(gateway.charge.with((42, 4_200))).throws_matching(ArgMatcher::error_kind::<Declined>());
    verify_in_order(&[&gateway.quote.with((7,)), &gateway.charge.with((7, ArgMatcher::any()))]);

    // Fails on purpose; the tracing reporter logs it
    verify_never(gateway.quote.with((42,)));

    Ok(())
}
