//! Built-in mission kernel sources.

use chrono::{Duration, NaiveDate};
use url::Url;

use crate::patterns;
use crate::provider::{DirectoryProvider, KernelProvider, StaticProvider};
use crate::record::{KernelClass, RemoteKernel, SortKey};

const PSP_PREDICT_URL: &str =
    "https://spdf.gsfc.nasa.gov/pub/data/psp/ephemeris/spice/Long_Term_Predicted_Ephemeris/";
const PSP_RECON_URL: &str = "https://sppgway.jhuapl.edu/recon_ephem";
const SOLO_KERNELS_URL: &str = "http://spiftp.esac.esa.int/data/SPICE/SOLAR-ORBITER/kernels/";
const STEREO_SPICE_URL: &str = "https://sohowww.nascom.nasa.gov/solarsoft/stereo/gen/data/spice";
const CASSINI_SPK_URL: &str = "https://naif.jpl.nasa.gov/pub/naif/CASSINI/kernels/spk/";

/// The static provider list the default registry is built from.
pub(crate) fn default_providers() -> Vec<Box<dyn KernelProvider>> {
    vec![
        Box::new(
            DirectoryProvider::new(
                "psp",
                KernelClass::Predict,
                SortKey::Version,
                PSP_PREDICT_URL,
                patterns::psp_predict,
            )
            .with_href_filter(|href| href.starts_with("spp")),
        ),
        Box::new(
            DirectoryProvider::new(
                "psp",
                KernelClass::Recon,
                SortKey::Version,
                PSP_RECON_URL,
                patterns::psp_recon,
            )
            // The gateway repeats the same filenames under archive/.
            .with_href_filter(|href| {
                href.starts_with("MOC/reconstructed_ephemeris") && !href.contains("archive")
            }),
        ),
        Box::new(
            DirectoryProvider::new(
                "solar orbiter",
                KernelClass::Predict,
                SortKey::Version,
                &format!("{SOLO_KERNELS_URL}spk/"),
                patterns::solo_predict,
            )
            .with_href_filter(|href| href.ends_with(".bsp")),
        ),
        Box::new(
            DirectoryProvider::new(
                "solar orbiter",
                KernelClass::Meta,
                SortKey::StartDate,
                &format!("{SOLO_KERNELS_URL}mk/"),
                patterns::solo_meta,
            )
            .with_href_filter(|href| href.ends_with(".tm"))
            .with_kernel_root(SOLO_KERNELS_URL),
        ),
        Box::new(
            DirectoryProvider::new(
                "stereo-a",
                KernelClass::Recon,
                SortKey::Version,
                &format!("{STEREO_SPICE_URL}/depm/ahead/"),
                patterns::stereo_recon_ahead,
            )
            .with_href_filter(|href| href.ends_with(".bsp"))
            .with_backfilled_end_dates(),
        ),
        Box::new(
            DirectoryProvider::new(
                "stereo-b",
                KernelClass::Recon,
                SortKey::Version,
                &format!("{STEREO_SPICE_URL}/depm/behind/"),
                patterns::stereo_recon_behind,
            )
            .with_href_filter(|href| href.ends_with(".bsp"))
            .with_backfilled_end_dates(),
        ),
        Box::new(stereo_ahead_predict()),
        Box::new(
            DirectoryProvider::new(
                "cassini",
                KernelClass::Recon,
                SortKey::Version,
                CASSINI_SPK_URL,
                patterns::cassini_recon,
            )
            .with_href_filter(|href| href.ends_with(".bsp")),
        ),
    ]
}

/// The archive publishes a single long-range predicted file whose coverage
/// is part of the filename, not of any listing.
fn stereo_ahead_predict() -> StaticProvider {
    let file = "ahead_2017_061_5295day_predict.epm.bsp";
    let start = NaiveDate::from_yo_opt(2017, 61).expect("day-of-year");
    let end = start + Duration::days(5295);
    let url = Url::parse(&format!("{STEREO_SPICE_URL}/epm/ahead/{file}")).expect("url");
    StaticProvider::new(
        "stereo-a",
        KernelClass::Predict,
        SortKey::Version,
        vec![RemoteKernel {
            url,
            start,
            end: Some(end),
            version: 1,
        }],
    )
}
