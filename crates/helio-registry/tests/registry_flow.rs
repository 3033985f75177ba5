//! Full resolution flows against a local HTTP archive: scrape a listing,
//! select, download through the cache, and furnish into a session.

use helio_engine::MockEngine;
use helio_kernel::KernelSession;
use helio_registry::{DirectoryProvider, KernelClass, KernelRegistry, SortKey, patterns};
use helio_store::{CacheStore, HttpClient};
use tempfile::TempDir;

const PSP_LISTING: &str = concat!(
    "<html><body><pre>",
    "<a href=\"../\">Parent Directory</a>\n",
    "<a href=\"spp_nom_20180812_20240831_v037_RO4.bsp\">spp_nom_20180812_20240831_v037_RO4.bsp</a>\n",
    "<a href=\"spp_nom_20180812_20250831_v038_RO5.bsp\">spp_nom_20180812_20250831_v038_RO5.bsp</a>\n",
    "<a href=\"checksums.txt\">checksums.txt</a>",
    "</pre></body></html>",
);

#[test]
fn scraped_predict_source_materializes_only_the_latest() {
    let mut server = mockito::Server::new();
    let listing = server
        .mock("GET", "/ephem/")
        .with_body(PSP_LISTING)
        .expect(2)
        .create();
    let v38 = server
        .mock("GET", "/ephem/spp_nom_20180812_20250831_v038_RO5.bsp")
        .with_body("v38 bytes")
        .expect(1)
        .create();
    let v37 = server
        .mock("GET", "/ephem/spp_nom_20180812_20240831_v037_RO4.bsp")
        .expect(0)
        .create();

    let cache = TempDir::new().expect("tmp");
    let store = CacheStore::open(cache.path()).expect("open");
    let mut registry = KernelRegistry::new(store, HttpClient::default());
    registry.register(Box::new(
        DirectoryProvider::new(
            "psp",
            KernelClass::Predict,
            SortKey::Version,
            &format!("{}/ephem/", server.url()),
            patterns::psp_predict,
        )
        .with_href_filter(|href| href.starts_with("spp")),
    ));

    let rows = registry.get_available_kernels("psp").expect("rows");
    assert_eq!(rows.len(), 2);

    let mut session = KernelSession::new(MockEngine::new());
    let kernels = registry
        .get_kernels("psp", KernelClass::Predict, None, &mut session)
        .expect("kernels");
    assert_eq!(kernels.len(), 1);
    assert!(kernels[0]
        .path()
        .ends_with("spp_nom_20180812_20250831_v038_RO5.bsp"));
    assert_eq!(session.engine().furnished().len(), 1);

    listing.assert();
    v38.assert();
    v37.assert();
}

#[test]
fn version_filter_selects_an_exact_record() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/ephem/").with_body(PSP_LISTING).create();
    let v37 = server
        .mock("GET", "/ephem/spp_nom_20180812_20240831_v037_RO4.bsp")
        .with_body("v37 bytes")
        .expect(1)
        .create();

    let cache = TempDir::new().expect("tmp");
    let store = CacheStore::open(cache.path()).expect("open");
    let mut registry = KernelRegistry::new(store, HttpClient::default());
    registry.register(Box::new(
        DirectoryProvider::new(
            "psp",
            KernelClass::Predict,
            SortKey::Version,
            &format!("{}/ephem/", server.url()),
            patterns::psp_predict,
        )
        .with_href_filter(|href| href.starts_with("spp")),
    ));

    let mut session = KernelSession::new(MockEngine::new());
    let kernels = registry
        .get_kernels("psp", KernelClass::Predict, Some(37), &mut session)
        .expect("kernels");
    assert_eq!(kernels.len(), 1);
    assert!(kernels[0]
        .path()
        .ends_with("spp_nom_20180812_20240831_v037_RO4.bsp"));
    v37.assert();
}

const SOLO_MK_LISTING: &str = concat!(
    "<html><body><pre>",
    "<a href=\"solo_ANC_soc-flown-mk_V105_20201101_001.tm\">older</a>\n",
    "<a href=\"solo_ANC_soc-flown-mk_V106_20201216_001.tm\">newer</a>\n",
    "<a href=\"aareadme.txt\">aareadme.txt</a>",
    "</pre></body></html>",
);

const SOLO_MK_TEXT: &str = "\
KPL/MK

   PATH_VALUES     = ( '..' )
   PATH_SYMBOLS    = ( 'KERNELS' )

   KERNELS_TO_LOAD = (
      '$KERNELS/sclk/solo_fict.tsc'
      '$KERNELS/spk/solo_orbit.bsp'
   )
";

#[test]
fn meta_source_resolves_and_furnishes_references_in_order() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/kernels/mk/")
        .with_body(SOLO_MK_LISTING)
        .create();
    let newer = server
        .mock("GET", "/kernels/mk/solo_ANC_soc-flown-mk_V106_20201216_001.tm")
        .with_body(SOLO_MK_TEXT)
        .expect(1)
        .create();
    let older = server
        .mock("GET", "/kernels/mk/solo_ANC_soc-flown-mk_V105_20201101_001.tm")
        .expect(0)
        .create();
    let sclk = server
        .mock("GET", "/kernels/sclk/solo_fict.tsc")
        .with_body("clock")
        .expect(1)
        .create();
    let spk = server
        .mock("GET", "/kernels/spk/solo_orbit.bsp")
        .with_body("orbit")
        .expect(1)
        .create();

    let cache = TempDir::new().expect("tmp");
    let store = CacheStore::open(cache.path()).expect("open");
    let mut registry = KernelRegistry::new(store, HttpClient::default());
    registry.register(Box::new(
        DirectoryProvider::new(
            "solar orbiter",
            KernelClass::Meta,
            SortKey::StartDate,
            &format!("{}/kernels/mk/", server.url()),
            patterns::solo_meta,
        )
        .with_href_filter(|href| href.ends_with(".tm"))
        .with_kernel_root(&format!("{}/kernels/", server.url())),
    ));

    let mut session = KernelSession::new(MockEngine::new());
    let kernels = registry
        .get_kernels("solar orbiter", KernelClass::Meta, None, &mut session)
        .expect("kernels");
    assert_eq!(kernels.len(), 1);

    // References land under the cache keeping the expected folder layout,
    // and are furnished before the meta-kernel, in listed order.
    assert!(cache.path().join("sclk/solo_fict.tsc").exists());
    assert!(cache.path().join("spk/solo_orbit.bsp").exists());
    let order = session.engine().furnished();
    assert_eq!(order.len(), 3);
    assert!(order[0].ends_with("sclk/solo_fict.tsc"));
    assert!(order[1].ends_with("spk/solo_orbit.bsp"));
    assert!(order[2].ends_with("solo_ANC_soc-flown-mk_V106_20201216_001.tm"));

    // The placeholder now points at the meta-kernel's own directory.
    let rewritten = std::fs::read_to_string(
        cache.path().join("solo_ANC_soc-flown-mk_V106_20201216_001.tm"),
    )
    .expect("read");
    assert!(!rewritten.contains("( '..' )"));
    assert!(rewritten.contains(&*cache.path().to_string_lossy()));

    newer.assert();
    older.assert();
    sclk.assert();
    spk.assert();
}
