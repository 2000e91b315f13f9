//! End-to-end quote generation against a SQLite database.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use valvequote_core::casting::{
    CastingService, CastingServiceTrait, NewCastingSeries, NewCastingType, SeriesSelection,
};
use valvequote_core::catalogs::{CatalogDraft, CatalogService, CatalogServiceTrait};
use valvequote_core::constants::{CATALOG_ACTUATOR, CATALOG_BODY};
use valvequote_core::customers::{CustomerService, CustomerServiceTrait, NewCustomer};
use valvequote_core::pricing::{CastingAttributes, NodeField, PricingNode, PricingTree, TreeEdit};
use valvequote_core::quotes::{
    ComponentSelection, CustomCost, QuoteRequest, QuoteService, QuoteServiceTrait,
};
use valvequote_core::settings::{CurrencyRate, SettingsService, SettingsServiceTrait, SettingsUpdate};
use valvequote_core::Error;
use valvequote_storage_sqlite::casting::CastingRepository;
use valvequote_storage_sqlite::catalogs::CatalogRepository;
use valvequote_storage_sqlite::customers::CustomerRepository;
use valvequote_storage_sqlite::quotes::QuoteRepository;
use valvequote_storage_sqlite::settings::SettingsRepository;
use valvequote_storage_sqlite::{create_pool, run_migrations, spawn_writer};

struct App {
    catalogs: Arc<CatalogService>,
    casting: Arc<CastingService>,
    customers: Arc<CustomerService>,
    settings: Arc<SettingsService>,
    quotes: QuoteService,
    _temp_dir: TempDir,
}

fn open_app() -> App {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("valvequote.db");
    let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    let catalogs = Arc::new(CatalogService::new(Arc::new(CatalogRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let casting = Arc::new(CastingService::new(Arc::new(CastingRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let customers = Arc::new(CustomerService::new(Arc::new(CustomerRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let settings = Arc::new(SettingsService::new(Arc::new(SettingsRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let quotes = QuoteService::new(
        Arc::new(QuoteRepository::new(pool, writer)),
        catalogs.clone(),
        customers.clone(),
        casting.clone(),
        settings.clone(),
    );

    App {
        catalogs,
        casting,
        customers,
        settings,
        quotes,
        _temp_dir: temp_dir,
    }
}

/// Seeds catalogs, a casting series, a customer and a USD rate. Returns
/// `(customer_id, type_id, series_id)`.
async fn seed(app: &App) -> (String, String, String) {
    app.catalogs.ensure_default_catalogs().await.unwrap();
    app.catalogs
        .save_tree(
            CATALOG_BODY,
            PricingTree::new(
                "Valve Type",
                vec![PricingNode::leaf("Globe", dec!(0))
                    .with_casting(CastingAttributes::new(dec!(10), dec!(200)))],
            ),
        )
        .await
        .unwrap();
    app.catalogs
        .save_tree(
            CATALOG_ACTUATOR,
            PricingTree::new(
                "Type",
                vec![PricingNode::branch(
                    "Pneumatic",
                    dec!(1000),
                    "Size",
                    vec![PricingNode::leaf("Size 2", dec!(500))],
                )],
            ),
        )
        .await
        .unwrap();

    let steel = app
        .casting
        .create_casting_type(NewCastingType {
            id: None,
            name: "Cast Steel".to_string(),
        })
        .await
        .unwrap();
    let steel = app
        .casting
        .add_series(
            &steel.id,
            NewCastingSeries {
                name: "WCB".to_string(),
                rate: dec!(50),
            },
        )
        .await
        .unwrap();

    let customer = app
        .customers
        .create_customer(NewCustomer {
            id: None,
            name: "Acme Refineries".to_string(),
            email: "buyer@acme.in".to_string(),
            phone: "+91 22 5555 0100".to_string(),
            address: "Plot 7, MIDC, Pune".to_string(),
            country: "India".to_string(),
            tax_id: Some("27aapfu0939f1zv".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    app.settings
        .update_settings(&SettingsUpdate {
            currencies: Some(vec![CurrencyRate::new("USD", dec!(80))]),
            ..Default::default()
        })
        .await
        .unwrap();

    (customer.id, steel.id.clone(), steel.series[0].id.clone())
}

fn request(customer_id: &str, type_id: &str, series_id: &str, currency: &str) -> QuoteRequest {
    let mut custom_costs = BTreeMap::new();
    custom_costs.insert(
        "Testing".to_string(),
        CustomCost {
            price: dec!(500),
            notes: String::new(),
        },
    );
    QuoteRequest {
        customer_id: customer_id.to_string(),
        currency: currency.to_string(),
        series: Some(SeriesSelection {
            type_id: type_id.to_string(),
            series_id: series_id.to_string(),
        }),
        components: vec![
            ComponentSelection {
                label: "Body".to_string(),
                catalog_id: CATALOG_BODY.to_string(),
                path: vec![0],
            },
            ComponentSelection {
                label: "Actuator".to_string(),
                catalog_id: CATALOG_ACTUATOR.to_string(),
                // The trailing index is stale and gets dropped.
                path: vec![0, 0, 4],
            },
        ],
        custom_costs,
    }
}

#[tokio::test]
async fn test_generate_and_reload_quote() {
    let app = open_app();
    let (customer_id, type_id, series_id) = seed(&app).await;

    let quote = app
        .quotes
        .generate_quote(request(&customer_id, &type_id, &series_id, "USD"))
        .await
        .unwrap();

    // 10 kg · 50 + 200 machining, 1000 + 500 actuator, 500 testing
    assert_eq!(quote.casting.as_ref().unwrap().total, dec!(700));
    assert_eq!(quote.components_total, dec!(1500));
    assert_eq!(quote.base_total, dec!(2700));
    assert_eq!(quote.total, dec!(33.75));
    assert_eq!(quote.line_items[1].path, vec![0, 0]);
    assert_eq!(quote.customer.tax_id.as_deref(), Some("27AAPFU0939F1ZV"));

    let reloaded = app.quotes.get_quote(&quote.id).unwrap();
    assert_eq!(reloaded, quote);

    let summary = app.quotes.get_quote_summary(Utc::now().naive_utc()).unwrap();
    assert_eq!(summary.quote_count, 1);
    assert_eq!(summary.total_sales, dec!(2700));
    assert_eq!(summary.monthly_growth, dec!(100));
}

#[tokio::test]
async fn test_catalog_edits_change_later_quotes_only() {
    let app = open_app();
    let (customer_id, type_id, series_id) = seed(&app).await;
    let first = app
        .quotes
        .generate_quote(request(&customer_id, &type_id, &series_id, "INR"))
        .await
        .unwrap();

    let mut draft = CatalogDraft::open(app.catalogs.as_ref(), CATALOG_ACTUATOR).unwrap();
    draft
        .apply(&TreeEdit::UpdateField {
            path: vec![0, 0],
            field: NodeField::Price(dec!(800)),
        })
        .unwrap();
    draft.save(app.catalogs.as_ref()).await.unwrap();

    let second = app
        .quotes
        .generate_quote(request(&customer_id, &type_id, &series_id, "INR"))
        .await
        .unwrap();

    assert_eq!(first.base_total, dec!(2700));
    assert_eq!(second.base_total, dec!(3000));
    assert_eq!(app.quotes.get_quote(&first.id).unwrap().base_total, dec!(2700));
    assert_eq!(app.quotes.list_quotes().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_tree_is_not_persisted() {
    let app = open_app();
    app.catalogs.ensure_default_catalogs().await.unwrap();

    let mut tree = PricingTree::new(
        "Type",
        vec![
            PricingNode::leaf("Manual", dec!(100)),
            PricingNode::leaf("Manual", dec!(200)),
        ],
    );
    assert!(matches!(
        app.catalogs.save_tree(CATALOG_ACTUATOR, tree.clone()).await,
        Err(Error::Pricing(_))
    ));

    tree.children[1].name = "Electric".to_string();
    app.catalogs.save_tree(CATALOG_ACTUATOR, tree.clone()).await.unwrap();
    assert_eq!(app.catalogs.load_tree(CATALOG_ACTUATOR).unwrap(), tree);
}

#[tokio::test]
async fn test_high_precision_amounts_survive_reload() {
    let app = open_app();
    let (customer_id, type_id, series_id) = seed(&app).await;

    let actuator = PricingTree::new(
        "Type",
        vec![PricingNode::branch(
            "Pneumatic",
            dec!(1000),
            "Size",
            vec![PricingNode::leaf("Size 2", dec!(499.123456789012345678))],
        )],
    );
    app.catalogs
        .save_tree(CATALOG_ACTUATOR, actuator.clone())
        .await
        .unwrap();
    assert_eq!(app.catalogs.load_tree(CATALOG_ACTUATOR).unwrap(), actuator);

    let mut request = request(&customer_id, &type_id, &series_id, "USD");
    request.custom_costs.insert(
        "Freight".to_string(),
        CustomCost {
            price: dec!(1234567.123456789012345),
            notes: "Sea freight".to_string(),
        },
    );
    let quote = app.quotes.generate_quote(request).await.unwrap();
    assert_eq!(quote.base_total, dec!(1237266.246913578024690678));

    let reloaded = app.quotes.get_quote(&quote.id).unwrap();
    assert_eq!(reloaded.base_total, quote.base_total);
    assert_eq!(reloaded, quote);
}
