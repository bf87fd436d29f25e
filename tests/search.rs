mod common;

use autochek_scout::scrapers::autochek::FALLBACK_LISTING_ID;
use autochek_scout::scrapers::Interrupt;
use autochek_scout::{AutochekScraper, ScrapeError, ScraperConfig, SearchOutcome, StopReason};
use common::*;

fn corolla_site() -> FakeSite {
    FakeSite::default()
        .with_page(ROOT, "<html><body><h1>Autochek</h1></body></html>".to_string())
        .with_page(
            &page_url(1),
            results_page(&[
                card("abc123", "Toyota Corolla 2015 LE", "NGN 5,500,000", "85,000 km"),
                card("def456", "Honda Accord 2017", "₦ 9,800,000", "40,210 km"),
            ]),
        )
        .with_page(&page_url(2), results_page(&[]))
}

#[test]
fn live_search_extracts_listings() {
    let site = corolla_site();
    let scraper = AutochekScraper::with_parts(
        fast_config(),
        FakeLauncher::Site(site.clone()),
        ScriptedHttp::new(&[]),
    )
    .unwrap();

    let outcome = scraper.search("Toyota", "Corolla", 2015).unwrap();

    let SearchOutcome::Live { listings, stop } = outcome else {
        panic!("expected a live result");
    };
    assert_eq!(stop, StopReason::Exhausted { last_page: 2 });
    assert_eq!(listings.len(), 2);

    let corolla = &listings[0];
    assert_eq!(corolla.listing_id.as_deref(), Some("abc123"));
    assert_eq!(corolla.make.as_deref(), Some("Toyota"));
    assert_eq!(corolla.model.as_deref(), Some("Corolla"));
    assert_eq!(corolla.year, Some(2015));
    assert_eq!(corolla.variant.as_deref(), Some("LE"));
    assert_eq!(corolla.price, Some(5_500_000));
    assert_eq!(corolla.currency, "NGN");
    assert_eq!(corolla.mileage, Some(85_000));
    assert_eq!(corolla.location.as_deref(), Some("Lagos"));
    assert_eq!(
        corolla.listing_url.as_deref(),
        Some("https://autochek.africa/ng/car/toyota-corolla-2015-le-ref-abc123")
    );
    assert_eq!(
        corolla.thumbnail_url.as_deref(),
        Some("https://media.autochek.africa/abc123.jpg")
    );

    // query arguments do not filter by default
    assert_eq!(listings[1].make.as_deref(), Some("Honda"));

    assert_eq!(site.visits(), vec![ROOT.to_string(), page_url(1), page_url(2)]);
}

#[test]
fn filter_to_query_keeps_matching_listings() {
    let config = ScraperConfig {
        filter_to_query: true,
        ..fast_config()
    };
    let scraper = AutochekScraper::with_parts(
        config,
        FakeLauncher::Site(corolla_site()),
        ScriptedHttp::new(&[]),
    )
    .unwrap();

    let listings = scraper
        .search("toyota", "COROLLA", 2015)
        .unwrap()
        .into_listings();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].listing_id.as_deref(), Some("abc123"));
}

#[test]
fn launch_failure_degrades_to_fallback_listing() {
    let http = ScriptedHttp::new(&[200]);
    let scraper = AutochekScraper::with_parts(fast_config(), FakeLauncher::Broken, http).unwrap();

    let outcome = scraper.search("Toyota", "Corolla", 2015).unwrap();

    assert!(outcome.is_degraded());
    let SearchOutcome::Degraded { listings, cause } = outcome else {
        unreachable!();
    };
    assert!(cause.contains("Failed to launch Chrome browser"), "cause: {}", cause);
    assert_eq!(listings.len(), 1);

    let placeholder = &listings[0];
    assert_eq!(placeholder.listing_id.as_deref(), Some(FALLBACK_LISTING_ID));
    assert_eq!(placeholder.make.as_deref(), Some("Toyota"));
    assert_eq!(placeholder.model.as_deref(), Some("Corolla"));
    assert_eq!(placeholder.year, Some(2015));
    assert_eq!(placeholder.price, None);
    assert_eq!(placeholder.listing_url.as_deref(), Some(ROOT));
}

#[test]
fn unreachable_root_page_degrades() {
    let site = FakeSite::default().with_broken(ROOT);
    let scraper = AutochekScraper::with_parts(
        fast_config(),
        FakeLauncher::Site(site.clone()),
        ScriptedHttp::new(&[200]),
    )
    .unwrap();

    let outcome = scraper.search("Toyota", "Corolla", 2015).unwrap();

    assert!(outcome.is_degraded());
    assert_eq!(outcome.listings().len(), 1);
    assert_eq!(site.visits(), vec![ROOT.to_string(), ROOT.to_string()]);
}

#[test]
fn first_results_page_failure_is_an_empty_live_result() {
    let site = FakeSite::default()
        .with_page(ROOT, "<html></html>".to_string())
        .with_broken(&page_url(1));
    let scraper = AutochekScraper::with_parts(
        fast_config(),
        FakeLauncher::Site(site),
        ScriptedHttp::new(&[200]),
    )
    .unwrap();

    let outcome = scraper.search("Toyota", "Corolla", 2015).unwrap();

    let SearchOutcome::Live { listings, stop } = outcome else {
        panic!("results-page failures must not reach the fallback");
    };
    assert!(listings.is_empty());
    assert!(matches!(stop, StopReason::Failed { page: 1, .. }));
}

#[test]
fn fallback_client_error_gives_empty_degraded_result() {
    let http = ScriptedHttp::new(&[404]);
    let scraper = AutochekScraper::with_parts(fast_config(), FakeLauncher::Broken, http).unwrap();

    let outcome = scraper.search("Toyota", "Corolla", 2015).unwrap();

    assert!(outcome.is_degraded());
    assert!(outcome.listings().is_empty());
}

#[test]
fn fallback_server_errors_exhaust_retries() {
    let http = ScriptedHttp::new(&[503, 503]);
    let scraper = AutochekScraper::with_parts(fast_config(), FakeLauncher::Broken, http).unwrap();

    let err = scraper.search("Toyota", "Corolla", 2015).unwrap_err();

    assert!(matches!(err, ScrapeError::RetriesExhausted { attempts: 2, .. }));
}

#[test]
fn fallback_recovers_after_server_error() {
    let http = ScriptedHttp::new(&[502, 200]);
    let scraper = AutochekScraper::with_parts(fast_config(), FakeLauncher::Broken, http).unwrap();

    let outcome = scraper.search("Toyota", "Corolla", 2015).unwrap();

    assert_eq!(outcome.listings().len(), 1);
}

#[test]
fn invalid_arguments_are_rejected_before_scraping() {
    let site = corolla_site();
    let scraper = AutochekScraper::with_parts(
        fast_config(),
        FakeLauncher::Site(site.clone()),
        ScriptedHttp::new(&[200]),
    )
    .unwrap();

    assert!(matches!(
        scraper.search("", "Corolla", 2015),
        Err(ScrapeError::InvalidArguments(_))
    ));
    assert!(matches!(
        scraper.search("Toyota", "Corolla", 1899),
        Err(ScrapeError::InvalidArguments(_))
    ));
    assert!(site.visits().is_empty());
}

#[test]
fn interrupted_search_skips_fallback() {
    let scraper = AutochekScraper::with_parts(
        fast_config(),
        FakeLauncher::Site(corolla_site()),
        ScriptedHttp::new(&[200]),
    )
    .unwrap();
    scraper.interrupt_handle().trigger();

    let err = scraper.search("Toyota", "Corolla", 2015).unwrap_err();

    assert!(matches!(err, ScrapeError::Interrupted));
}

#[test]
fn interrupt_during_root_navigation_skips_fallback() {
    let interrupt = Interrupt::new();
    let site = FakeSite::default()
        .with_broken(ROOT)
        .with_trap(ROOT, &interrupt);
    let scraper = AutochekScraper::with_parts(
        fast_config(),
        FakeLauncher::Site(site.clone()),
        ScriptedHttp::new(&[200]),
    )
    .unwrap()
    .with_interrupt(interrupt);

    let err = scraper.search("Toyota", "Corolla", 2015).unwrap_err();

    assert!(matches!(err, ScrapeError::Interrupted));
    assert_eq!(site.visits(), vec![ROOT.to_string()]);
}

#[test]
fn oversized_rate_limit_is_a_config_error() {
    let config = ScraperConfig {
        rate_limit_secs: 1e30,
        ..fast_config()
    };
    let result = AutochekScraper::with_parts(config, FakeLauncher::Broken, ScriptedHttp::new(&[]));
    assert!(matches!(result, Err(ScrapeError::Config(_))));
}

#[test]
fn invalid_config_is_rejected() {
    let config = ScraperConfig {
        max_pages: 0,
        ..fast_config()
    };
    let result = AutochekScraper::with_parts(config, FakeLauncher::Broken, ScriptedHttp::new(&[]));
    assert!(matches!(result, Err(ScrapeError::Config(_))));
}
