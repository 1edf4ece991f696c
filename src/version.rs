//! Version and build information embedded by `build.rs`.

use std::fmt;

/// Build information embedded at compile time
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// Short git commit hash, "unknown" outside a checkout
    pub git_hash: &'static str,
    pub git_branch: &'static str,
    /// "true", "false" or "unknown"
    git_dirty: &'static str,
    pub build_timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc_version: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("SCHOOL_ROSTER_GIT_HASH"),
            git_branch: env!("SCHOOL_ROSTER_GIT_BRANCH"),
            git_dirty: env!("SCHOOL_ROSTER_GIT_DIRTY"),
            build_timestamp: env!("SCHOOL_ROSTER_BUILD_TIMESTAMP"),
            target: env!("SCHOOL_ROSTER_TARGET"),
            profile: env!("SCHOOL_ROSTER_PROFILE"),
            rustc_version: env!("SCHOOL_ROSTER_RUSTC_VERSION"),
        }
    }

    pub fn git_dirty(&self) -> bool {
        self.git_dirty == "true"
    }

    /// Version with git hash, e.g. "0.1.0-abc1234" or "0.1.0-abc1234-dirty"
    pub fn full_version(&self) -> String {
        let suffix = if self.git_dirty() { "-dirty" } else { "" };
        format!("{}-{}{}", self.version, self.git_hash, suffix)
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.name, self.full_version())?;
        writeln!(f)?;
        writeln!(f, "Build Information:")?;
        writeln!(f, "  Version:  {}", self.version)?;
        writeln!(f, "  Git Hash: {}", self.git_hash)?;
        writeln!(f, "  Branch:   {}", self.git_branch)?;
        writeln!(f, "  Built:    {}", self.build_timestamp)?;
        writeln!(f, "  Profile:  {}", self.profile)?;
        writeln!(f, "  Target:   {}", self.target)?;
        writeln!(f, "  Compiler: {}", self.rustc_version)
    }
}

/// Print version information to stdout
pub fn print_version() {
    print!("{}", BuildInfo::current());
}
