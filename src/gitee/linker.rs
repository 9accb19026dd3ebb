//! Web links for Gitee resources.

use crate::scm::client::Linker;
use crate::scm::refs;
use crate::scm::types::Reference;

pub(crate) struct GiteeLinker {
    base: String,
}

impl GiteeLinker {
    pub(crate) const fn new(base: String) -> Self {
        Self { base }
    }
}

impl Linker for GiteeLinker {
    fn resource(&self, repo: &str, reference: &Reference) -> String {
        let base = &self.base;
        if refs::is_tag(&reference.path) {
            let name = refs::trim_ref(&reference.path);
            format!("{base}{repo}/tree/{name}")
        } else if refs::is_pull_request(&reference.path) {
            let number = refs::extract_pull_request(&reference.path).unwrap_or_default();
            format!("{base}{repo}/pulls/{number}")
        } else if reference.sha.is_empty() {
            let name = refs::trim_ref(&reference.path);
            format!("{base}{repo}/tree/{name}")
        } else {
            format!("{base}{repo}/commit/{}", reference.sha)
        }
    }

    fn diff(&self, repo: &str, source: &Reference, target: &Reference) -> String {
        let base = &self.base;
        if refs::is_pull_request(&target.path) {
            let number = refs::extract_pull_request(&target.path).unwrap_or_default();
            return format!("{base}{repo}/pulls/{number}/files");
        }
        let from = side(source);
        let to = side(target);
        format!("{base}{repo}/compare/{from}...{to}")
    }
}

/// A diff side renders as its sha when present, else its trimmed name.
fn side(reference: &Reference) -> &str {
    if reference.sha.is_empty() {
        refs::trim_ref(&reference.path)
    } else {
        &reference.sha
    }
}
