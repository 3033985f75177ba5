//! End-to-end meta-kernel materialization against a local HTTP server.

use helio_engine::MockEngine;
use helio_kernel::{Kernel, KernelKind, KernelSession, MetaKernel};
use helio_store::{HttpClient, HttpConfig};
use tempfile::TempDir;
use url::Url;

const META_TEXT: &str = "\
KPL/MK

   PATH_VALUES     = ( '..' )
   PATH_SYMBOLS    = ( 'KERNELS' )

   KERNELS_TO_LOAD = (
      '$KERNELS/sclk/solo.tsc'
      '$KERNELS/spk/solo_orbit.bsp'
   )
";

#[test]
fn resolve_downloads_missing_references_and_furnishes_in_order() {
    let mut server = mockito::Server::new();
    let sclk = server
        .mock("GET", "/kernels/sclk/solo.tsc")
        .with_body("clock")
        .expect(1)
        .create();
    let spk = server
        .mock("GET", "/kernels/spk/solo_orbit.bsp")
        .with_body("orbit")
        .expect(1)
        .create();

    let cache = TempDir::new().expect("tmp");
    let meta_path = cache.path().join("solo_mk.tm");
    std::fs::write(&meta_path, META_TEXT).expect("write meta");

    let client = HttpClient::new(HttpConfig::default());
    let root = Url::parse(&format!("{}/kernels/", server.url())).expect("url");

    let meta = MetaKernel::open(&meta_path).expect("open");
    assert_eq!(meta.references(), ["sclk/solo.tsc", "spk/solo_orbit.bsp"]);

    assert!(meta.rewrite_path_values().expect("rewrite"));
    meta.resolve(&root, &client).expect("resolve");
    assert!(cache.path().join("sclk/solo.tsc").exists());
    assert!(cache.path().join("spk/solo_orbit.bsp").exists());

    // A second resolve is pure cache hits.
    meta.resolve(&root, &client).expect("resolve again");
    sclk.assert();
    spk.assert();

    let mut session = KernelSession::new(MockEngine::new());
    let kernel = Kernel::load(&meta_path, &mut session).expect("load");
    assert_eq!(kernel.kind(), KernelKind::Meta);

    let order = session.engine().furnished();
    assert_eq!(order.len(), 3);
    assert!(order[0].ends_with("sclk/solo.tsc"));
    assert!(order[1].ends_with("spk/solo_orbit.bsp"));
    assert!(order[2].ends_with("solo_mk.tm"));
}
