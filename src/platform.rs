//! Maps the running platform onto the names release pipelines use.
//!
//! Release assets are almost always named with goreleaser-style OS and
//! architecture strings (`linux_amd64`, `darwin_arm64`, ...), so the template
//! variables use that vocabulary rather than Rust's target names.

use std::env::consts;

pub(crate) fn goos() -> &'static str {
    goos_for(consts::OS)
}

pub(crate) fn goarch() -> &'static str {
    goarch_for(consts::ARCH)
}

/// `.zip` on Windows, `.tar.gz` everywhere else.
pub(crate) fn archive_ext() -> &'static str {
    if consts::OS == "windows" {
        ".zip"
    } else {
        ".tar.gz"
    }
}

/// `.exe` on Windows, empty everywhere else.
pub(crate) fn bin_ext() -> &'static str {
    if consts::OS == "windows" {
        ".exe"
    } else {
        ""
    }
}

fn goos_for(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn goarch_for(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goos_mapping() {
        assert_eq!(goos_for("macos"), "darwin");
        assert_eq!(goos_for("linux"), "linux");
        assert_eq!(goos_for("windows"), "windows");
        assert_eq!(goos_for("freebsd"), "freebsd");
    }

    #[test]
    fn goarch_mapping() {
        assert_eq!(goarch_for("x86_64"), "amd64");
        assert_eq!(goarch_for("aarch64"), "arm64");
        assert_eq!(goarch_for("x86"), "386");
        assert_eq!(goarch_for("riscv64"), "riscv64");
    }

    #[test]
    fn current_platform_is_mapped() {
        assert!(!goos().is_empty());
        assert!(!goarch().is_empty());
        assert!(archive_ext() == ".tar.gz" || archive_ext() == ".zip");
    }
}
