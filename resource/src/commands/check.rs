//! `check`: report a fresh version so every build sees current secrets

use std::io::{Read, Write};

use tracing::debug;
use vr_errors::AppResult;

use crate::protocol::{write_response, Request, Version};

pub fn run<R: Read, W: Write>(stdin: R, stdout: W) -> AppResult<()> {
    let request = Request::decode(stdin)?;
    debug!(previous = ?request.version, "Checking for new version");
    write_response(stdout, &[Version::now()])
}
