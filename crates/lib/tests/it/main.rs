/*! Integration tests for caconf.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - persist: Tests for ConfigurationPersister writes, reads, deletes and errors
 * - naming: Tests for naming strategies driving the physical layout
 * - store: Tests for the InMemory store, including file write-back
 * - context: Tests for the ContextAwareConfig façade and typed configurations
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("caconf=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod context;
mod naming;
