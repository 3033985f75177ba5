//! Generic planetary ephemerides from the NAIF archive.

use helio_engine::SpiceEngine;
use helio_kernel::{Kernel, KernelSession};
use helio_store::{CacheStore, HttpClient};
use url::Url;

use crate::{RegistryError, RegistryResult};

const PLANETARY_SPK_URL: &str =
    "https://naif.jpl.nasa.gov/pub/naif/generic_kernels/spk/planets/";

/// Ephemeris used when the caller does not name one.
pub const DEFAULT_PLANETARY_EPHEMERIS: &str = "de440s";

/// Download (cache-aware) and furnish a JPL planetary ephemeris by name,
/// e.g. `de440s`. Any filename present under the NAIF planets archive is
/// accepted.
pub fn furnish_planetary_ephemeris<E: SpiceEngine>(
    client: &HttpClient,
    store: &CacheStore,
    name: &str,
    session: &mut KernelSession<E>,
) -> RegistryResult<Kernel> {
    let file = format!("{name}.bsp");
    let url = Url::parse(PLANETARY_SPK_URL)
        .expect("planetary archive url")
        .join(&file)
        .map_err(|_| RegistryError::InvalidEphemerisName {
            name: name.to_string(),
        })?;
    let path = store.fetch(client, &url, &file)?;
    Ok(Kernel::load(path, session)?)
}
