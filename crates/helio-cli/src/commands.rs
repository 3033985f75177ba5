use anyhow::Result;
use clap::Args;

use helio_engine::MockEngine;
use helio_kernel::KernelSession;
use helio_registry::{
    DEFAULT_PLANETARY_EPHEMERIS, KernelClass, KernelRegistry, furnish_planetary_ephemeris,
};

use crate::opts::GlobalOpts;
use crate::output;

#[derive(Args, Debug)]
pub struct KernelsArgs {
    /// Body name, e.g. 'psp' or 'solar orbiter'
    pub body: String,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Body name, e.g. 'psp' or 'solar orbiter'
    pub body: String,

    /// Kernel class: recon, predict, or meta
    pub class: KernelClass,

    /// Restrict to an exact version
    #[arg(long)]
    pub version: Option<u32>,
}

#[derive(Args, Debug)]
pub struct LatestArgs {
    /// Body name, e.g. 'psp' or 'solar orbiter'
    pub body: String,

    /// Kernel class: recon, predict, or meta
    pub class: KernelClass,
}

#[derive(Args, Debug)]
pub struct EphemerisArgs {
    /// Ephemeris name from the NAIF planets archive
    #[arg(default_value = DEFAULT_PLANETARY_EPHEMERIS)]
    pub name: String,
}

fn registry(opts: &GlobalOpts) -> Result<KernelRegistry> {
    Ok(KernelRegistry::with_default_sources(
        opts.store()?,
        opts.client(),
    ))
}

fn session() -> KernelSession<MockEngine> {
    KernelSession::new(MockEngine::new())
}

pub fn bodies(opts: &GlobalOpts) -> Result<()> {
    output::print_lines(opts, registry(opts)?.bodies())
}

pub fn kernels(opts: &GlobalOpts, args: KernelsArgs) -> Result<()> {
    let rows = registry(opts)?.get_available_kernels(&args.body)?;
    output::print_available(opts, &rows)
}

pub fn fetch(opts: &GlobalOpts, args: FetchArgs) -> Result<()> {
    let registry = registry(opts)?;
    let mut session = session();
    let kernels = registry.get_kernels(&args.body, args.class, args.version, &mut session)?;
    output::print_lines(
        opts,
        kernels
            .iter()
            .map(|k| k.path().display().to_string())
            .collect(),
    )
}

pub fn latest(opts: &GlobalOpts, args: LatestArgs) -> Result<()> {
    let registry = registry(opts)?;
    let mut session = session();
    let kernel = registry.get_latest_kernel(&args.body, args.class, &mut session)?;
    output::print_lines(opts, vec![kernel.path().display().to_string()])
}

pub fn ephemeris(opts: &GlobalOpts, args: EphemerisArgs) -> Result<()> {
    let store = opts.store()?;
    let client = opts.client();
    let mut session = session();
    let kernel = furnish_planetary_ephemeris(&client, &store, &args.name, &mut session)?;
    output::print_lines(opts, vec![kernel.path().display().to_string()])
}
