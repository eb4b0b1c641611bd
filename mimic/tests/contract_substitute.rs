//! A hand-written substitute covering all four call shapes, used the way a
//! test of some consumer code would use it.

use mimic::reporters::CollectingReporter;
use mimic::*;

#[derive(Debug, thiserror::Error)]
#[error("warehouse offline")]
struct Offline;

#[derive(Debug, thiserror::Error)]
#[error("out of stock: {0}")]
struct OutOfStock(String);

trait Warehouse {
    fn price(&self, fruit: String) -> u32;
    fn reserve(&self, fruit: String, amount: u32) -> Result<u64>;
    fn restock(&self, fruit: String) -> impl Future<Output = u32> + Send;
    fn ship(&self, order: u64, express: bool) -> impl Future<Output = Result<()>> + Send;
}

struct WarehouseSpy {
    price: Spy<(String,), u32, Plain>,
    reserve: Spy<(String, u32), u64, Throwing>,
    restock: Spy<(String,), u32, Suspending>,
    ship: Spy<(u64, bool), (), SuspendingThrowing>,
}

impl WarehouseSpy {
    fn new(failures: &CollectingReporter) -> Self {
        let config = Config::default().with_reporter(failures.clone());
        Self {
            price: Spy::with_config("price", config.clone()),
            reserve: Spy::with_config("reserve", config.clone()),
            restock: Spy::with_config("restock", config.clone()),
            ship: Spy::with_config("ship", config),
        }
    }
}

impl Warehouse for WarehouseSpy {
    fn price(&self, fruit: String) -> u32 {
        self.price.resolve((fruit,))
    }

    fn reserve(&self, fruit: String, amount: u32) -> Result<u64> {
        self.reserve.resolve_throwing((fruit, amount))
    }

    fn restock(&self, fruit: String) -> impl Future<Output = u32> + Send {
        self.restock.resolve_async((fruit,))
    }

    fn ship(&self, order: u64, express: bool) -> impl Future<Output = Result<()>> + Send {
        self.ship.resolve_throwing_async((order, express))
    }
}

/// Consumer code under test.
async fn buy(warehouse: &impl Warehouse, fruit: &str, amount: u32) -> Result<u32> {
    let unit = warehouse.price(fruit.to_string());
    let order = match warehouse.reserve(fruit.to_string(), amount) {
        Ok(order) => order,
        Err(e) if e.downcast_ref::<OutOfStock>().is_some() => {
            warehouse.restock(fruit.to_string()).await;
            warehouse.reserve(fruit.to_string(), amount)?
        }
        Err(e) => return Err(e),
    };
    warehouse.ship(order, amount > 10).await?;
    Ok(unit * amount)
}

#[test]
fn first_matching_stub_answers() {
    let failures = CollectingReporter::new();
    let warehouse = WarehouseSpy::new(&failures);
    when(warehouse.price.with(("apple",))).then_return(13);
    when(warehouse.price.any()).then_return(17);

    assert_eq!(warehouse.price("apple".into()), 13);
    assert_eq!(warehouse.price("banana".into()), 17);

    assert!(verify(warehouse.price.any()).called_times(2));
    assert!(verify(warehouse.price.with(("apple",))).called_times(1));
    assert!(failures.is_empty());

    assert!(!verify(warehouse.price.with(("pear",))).called_times(1));
    assert_eq!(failures.errors(), vec![Error::UnfulfilledCallCount(0)]);
}

#[test]
fn unstubbed_throwing_call_is_an_error() {
    let failures = CollectingReporter::new();
    let warehouse = WarehouseSpy::new(&failures);

    let error = warehouse.reserve("apple".into(), 1).unwrap_err();
    assert_eq!(
        error,
        Error::Unstubbed {
            spy: SpyId::new("reserve"),
            arguments: "(\"apple\", 1)".into(),
        }
    );
    assert!(verify(warehouse.reserve.any()).throws());
    assert!(failures.is_empty());
}

#[test]
fn calls_are_ordered_across_spies() {
    let failures = CollectingReporter::new();
    let config = Config::default().with_reporter(failures.clone());
    let a: Spy<(String,), ()> = Spy::with_config("a", config.clone());
    let b: Spy<(String,), ()> = Spy::with_config("b", config);
    when(a.any()).then_return(());
    when(b.any()).then_return(());

    a.resolve(("x".into(),));
    b.resolve(("y".into(),));

    assert!(verify_in_order(&[&a.with(("x",)), &b.with(("y",))]));
    assert!(!verify_in_order(&[&b.with(("y",)), &a.with(("x",))]));
    assert!(matches!(
        &failures.errors()[..],
        [Error::OutOfOrder { step: 1, .. }]
    ));
}

#[tokio::test]
async fn happy_path_through_consumer() {
    let failures = CollectingReporter::new();
    let warehouse = WarehouseSpy::new(&failures);
    when(warehouse.price.any()).then_return(3);
    when(warehouse.reserve.any()).then_return_with(|(_, amount)| u64::from(*amount) * 100);
    when(warehouse.ship.any()).then_return(());

    assert_eq!(buy(&warehouse, "apple", 4).await, Ok(12));

    assert!(verify(warehouse.ship.with((400, false))).called_times(1));
    assert!(verify_never(warehouse.restock.any()));
    assert!(verify_in_order(&[
        &warehouse.price.with(("apple",)),
        &warehouse.reserve.with(("apple", 4)),
        &warehouse.ship.any(),
    ]));
    assert!(failures.is_empty());
}

#[tokio::test]
async fn consumer_restocks_when_out_of_stock() {
    let failures = CollectingReporter::new();
    let warehouse = WarehouseSpy::new(&failures);
    when(warehouse.price.any()).then_return(2);
    when(warehouse.restock.any()).then_return(50);
    when(warehouse.ship.any()).then_return(());

    let restocked = warehouse.restock.clone();
    when(warehouse.reserve.any()).then_answer(move |(fruit, _)| {
        if restocked.call_count() == 0 {
            Err(Error::external(OutOfStock(fruit.clone())))
        } else {
            Ok(7)
        }
    });

    assert_eq!(buy(&warehouse, "kiwi", 20).await, Ok(40));

    assert!(verify(warehouse.reserve.any()).called_times(2));
    assert!(verify(warehouse.ship.with((7, true))).called());
    assert!(verify_in_order(&[
        &warehouse.reserve.any(),
        &warehouse.restock.with(("kiwi",)),
        &warehouse.reserve.any(),
    ]));
    assert!(failures.is_empty());
}

#[tokio::test]
async fn shipping_failure_surfaces_to_consumer() {
    let failures = CollectingReporter::new();
    let warehouse = WarehouseSpy::new(&failures);
    when(warehouse.price.any()).then_return(1);
    when(warehouse.reserve.any()).then_return(9);
    when(warehouse.ship.with((ArgMatcher::any(), true))).then_throw(Offline);
    when(warehouse.ship.any()).then_return(());

    assert!(buy(&warehouse, "fig", 1).await.is_ok());
    let error = buy(&warehouse, "fig", 11).await.unwrap_err();
    assert!(error.downcast_ref::<Offline>().is_some());

    assert!(
        verify(warehouse.ship.with((9, true))).throws_matching(ArgMatcher::error_kind::<Offline>())
    );
    assert!(!verify(warehouse.ship.with((9, false))).throws());
    assert_eq!(failures.errors(), vec![Error::DidNotThrow]);
}

#[test]
#[should_panic(expected = "no stub matched call price(\"apple\")")]
fn unstubbed_plain_call_panics() {
    let failures = CollectingReporter::new();
    let warehouse = WarehouseSpy::new(&failures);
    warehouse.price("apple".into());
}

#[tokio::test]
#[should_panic(expected = "no stub matched call restock(\"plum\")")]
async fn unstubbed_suspending_call_panics() {
    let failures = CollectingReporter::new();
    let warehouse = WarehouseSpy::new(&failures);
    warehouse.restock("plum".into()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_are_all_recorded() {
    let failures = CollectingReporter::new();
    let price: Spy<(u32,), u32> =
        Spy::with_config("price", Config::default().with_reporter(failures.clone()));
    when(price.any()).then_return_with(|(n,)| n * 2);

    let handles: Vec<_> = (0..100)
        .map(|n| {
            let price = price.clone();
            tokio::spawn(async move { price.resolve((n,)) })
        })
        .collect();
    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.await.unwrap(), n as u32 * 2);
    }

    let history = price.invocations();
    assert_eq!(history.len(), 100);
    assert!(history.windows(2).all(|w| w[0].sequence() < w[1].sequence()));
    assert!(verify(price.any()).called_times(100));
}

#[tokio::test]
async fn unstubbed_call_in_detached_task_is_not_lost() {
    let failures = CollectingReporter::new();
    let warehouse = std::sync::Arc::new(WarehouseSpy::new(&failures));

    let background = warehouse.clone();
    drop(tokio::spawn(async move { background.price("quince".into()) }));
    while !warehouse.price.is_faulted() {
        tokio::task::yield_now().await;
    }

    assert!(!verify(warehouse.price.any()).called_times(1));
    assert!(failures.errors()[0].is_unstubbed());
}
