use common::{Money, ProductId, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    CallerIdentity, CreateProduct, CreateTransaction, LedgerService, ProductService,
    StockCalculator,
};
use inventory_store::{InMemoryProductStore, InMemoryTransactionStore};

type Ledger = LedgerService<InMemoryTransactionStore, InMemoryProductStore>;
type Catalog = ProductService<InMemoryProductStore, Ledger>;

fn services() -> (Ledger, Catalog) {
    let products = InMemoryProductStore::new();
    let ledger = LedgerService::new(InMemoryTransactionStore::new(), products.clone());
    let catalog = ProductService::new(products, ledger.clone());
    (ledger, catalog)
}

/// Builds a catalog of `products` products with `per_product` movements each.
fn populated(rt: &tokio::runtime::Runtime, products: usize, per_product: i32) -> (Ledger, Catalog) {
    let (ledger, catalog) = services();
    let caller = CallerIdentity::new(UserId::new(1));
    rt.block_on(async {
        for n in 0..products {
            let id = catalog
                .create_product(CreateProduct::new(
                    format!("Product {n}"),
                    "",
                    Money::from_cents(100),
                ))
                .await
                .unwrap()
                .id;
            for i in 0..per_product {
                let cmd = if i % 3 == 0 {
                    CreateTransaction::stock_out(id, -1)
                } else {
                    CreateTransaction::stock_in(id, 2)
                };
                ledger.create_transaction(cmd, &caller).await.unwrap();
            }
        }
    });
    (ledger, catalog)
}

fn bench_create_transaction(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (ledger, _) = populated(&rt, 1, 0);
    let caller = CallerIdentity::new(UserId::new(1));

    c.bench_function("domain/create_transaction", |b| {
        b.iter(|| {
            rt.block_on(async {
                ledger
                    .create_transaction(CreateTransaction::stock_in(ProductId::new(1), 1), &caller)
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_rejected_transaction(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (ledger, _) = populated(&rt, 1, 0);
    let caller = CallerIdentity::new(UserId::new(1));

    c.bench_function("domain/rejected_sign_rule", |b| {
        b.iter(|| {
            rt.block_on(async {
                let _ = ledger
                    .create_transaction(CreateTransaction::stock_out(ProductId::new(1), 1), &caller)
                    .await;
            });
        });
    });
}

fn bench_calculate_stock(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (ledger, _) = populated(&rt, 10, 100);

    c.bench_function("domain/calculate_stock_100_entries", |b| {
        b.iter(|| {
            rt.block_on(async {
                ledger
                    .calculate_stock_for_product(ProductId::new(5))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_get_all_products(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (_, catalog) = populated(&rt, 50, 20);

    c.bench_function("domain/get_all_products_50", |b| {
        b.iter(|| {
            rt.block_on(async {
                catalog.get_all_products().await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_create_transaction,
    bench_rejected_transaction,
    bench_calculate_stock,
    bench_get_all_products,
);
criterion_main!(benches);
