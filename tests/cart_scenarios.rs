//! End-to-end cart scenarios against the bundled demo catalog.

use std::{cell::RefCell, rc::Rc, sync::Arc};

use testresult::TestResult;

use eshop::{
    cart::{CartChange, CartLine, CartStore, ChangeKind},
    fixtures::demo_catalog,
    persistence::{CartPersistence, FileStore},
    products::ProductId,
    view::{BadgeObserver, CartView, Page, PageSurface, PageView, ViewBinder},
};

#[test]
fn adding_then_subtracting_everything_empties_cart() -> TestResult {
    let mut store = CartStore::in_memory(Arc::new(demo_catalog()?));
    let watch = ProductId::new(1);

    store.add_item(watch, 1);
    store.add_item(watch, 2);

    assert_eq!(store.line(watch).map(CartLine::quantity), Some(3));

    store.update_quantity(watch, -3);

    assert!(store.is_empty());
    assert_eq!(store.item_count(), 0);

    Ok(())
}

#[test]
fn subtotal_sums_line_prices() -> TestResult {
    let mut store = CartStore::in_memory(Arc::new(demo_catalog()?));

    store.add_item(ProductId::new(3), 1);
    store.add_item(ProductId::new(6), 2);

    let headphones = store.catalog().get(ProductId::new(3)).ok_or("missing headphones")?;
    let wallet = store.catalog().get(ProductId::new(6)).ok_or("missing wallet")?;

    assert_eq!(store.subtotal(), headphones.price + wallet.price * 2);
    assert_eq!(store.subtotal(), 300_000_000);
    assert_eq!(store.item_count(), 3);

    Ok(())
}

#[test]
fn unknown_product_leaves_cart_unchanged() -> TestResult {
    let mut store = CartStore::in_memory(Arc::new(demo_catalog()?));
    let changes = Rc::new(RefCell::new(Vec::<CartChange>::new()));
    let sink = Rc::clone(&changes);

    store.add_item(ProductId::new(2), 1);
    store.subscribe(move |change: &CartChange| sink.borrow_mut().push(*change));

    let before = store.lines().to_vec();
    let persisted = store.persistence().try_load()?;

    store.add_item(ProductId::new(999), 1);

    assert_eq!(store.lines(), before.as_slice());
    assert_eq!(store.persistence().try_load()?, persisted);
    assert!(changes.borrow().is_empty());

    Ok(())
}

#[test]
fn cart_survives_reopening_from_disk() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = Arc::new(demo_catalog()?);

    {
        let mut store = CartStore::open(
            Arc::clone(&catalog),
            CartPersistence::new(FileStore::open(dir.path())?),
        );

        store.add_item(ProductId::new(8), 1);
        store.add_item(ProductId::new(4), 3);
        store.update_quantity(ProductId::new(8), 1);
    }

    let store = CartStore::open(
        Arc::clone(&catalog),
        CartPersistence::new(FileStore::open(dir.path())?),
    );

    let lines: Vec<(u32, u32)> = store
        .lines()
        .iter()
        .map(|line| (line.id().get(), line.quantity()))
        .collect();

    assert_eq!(lines, [(8, 2), (4, 3)]);

    Ok(())
}

#[test]
fn corrupt_file_hydrates_empty_cart() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("eshop_cart"), b"{\"version\":1,\"lines\":[{\"id\":")?;

    let store = CartStore::open(
        Arc::new(demo_catalog()?),
        CartPersistence::new(FileStore::open(dir.path())?),
    );

    assert!(store.is_empty());

    Ok(())
}

#[test]
fn views_are_consistent_right_after_mutation() -> TestResult {
    let mut store = CartStore::in_memory(Arc::new(demo_catalog()?));
    let badge = BadgeObserver::default();
    let changes = Rc::new(RefCell::new(Vec::<ChangeKind>::new()));
    let sink = Rc::clone(&changes);

    store.subscribe(badge.clone());
    store.subscribe(move |change: &CartChange| sink.borrow_mut().push(change.kind));

    store.add_one(ProductId::new(7));
    store.update_quantity(ProductId::new(7), 2);

    let binder = ViewBinder::new(&store);
    let views = binder.render(&PageSurface::for_page(Page::Cart));

    assert_eq!(badge.current(), binder.badge());
    assert_eq!(badge.current().count, 3);
    assert_eq!(
        changes.borrow().as_slice(),
        &[ChangeKind::Added, ChangeKind::QuantityChanged]
    );

    let Some(PageView::Cart(CartView::Summary(summary))) = views.first() else {
        return Err(format!("expected cart summary, got {views:?}").into());
    };

    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.subtotal, "Rp 5.400.000");

    Ok(())
}
