//! Start an embedded PostgreSQL cluster for a test suite.
//!
//! Unless both `PG_RUNTIME_DIR` and `PG_DATA_DIR` are already set, the
//! cluster is installed under Cargo's per-target scratch directory. The
//! variables are overridden only while the cluster boots.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static BOOT: Mutex<()> = Mutex::new(());

const ATTEMPTS: u32 = 4;
const FIRST_BACKOFF: Duration = Duration::from_millis(500);

/// Download hiccups worth another attempt.
const TRANSIENT: [&str; 5] = [
    "error decoding response body",
    "connection reset",
    "timed out",
    "temporarily unavailable",
    "dns error",
];

fn scratch_dirs() -> std::io::Result<(String, String)> {
    let base = PathBuf::from(env!("CARGO_TARGET_TMPDIR"))
        .join("pg-embed")
        .join(Uuid::new_v4().to_string());
    let install = base.join("install");
    let data = base.join("data");
    std::fs::create_dir_all(&install)?;
    std::fs::create_dir_all(&data)?;
    Ok((
        install.to_string_lossy().into_owned(),
        data.to_string_lossy().into_owned(),
    ))
}

fn boot_with_retries() -> Result<TestCluster, String> {
    let mut backoff = FIRST_BACKOFF;
    let mut attempt = 1;
    loop {
        let failure = match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => format!("{err:?}"),
        };
        let lowered = failure.to_lowercase();
        let transient = TRANSIENT.iter().any(|needle| lowered.contains(needle));
        if !transient || attempt == ATTEMPTS {
            return Err(failure);
        }
        eprintln!("pg-embed attempt {attempt} failed, retrying in {backoff:?}: {failure}");
        std::thread::sleep(backoff);
        backoff *= 2;
        attempt += 1;
    }
}

/// Boot a cluster, one suite thread at a time.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _boot = BOOT.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let configured =
        std::env::var_os("PG_RUNTIME_DIR").is_some() && std::env::var_os("PG_DATA_DIR").is_some();
    let _env = if configured {
        None
    } else {
        let (install, data) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(install)),
            ("PG_DATA_DIR", Some(data)),
        ]))
    };

    boot_with_retries()
}
