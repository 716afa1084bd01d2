/// The branch a release is cut from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_release: bool,
}

impl BranchContext {
    /// Create a branch context; `release_branches` lists the branches that
    /// produce plain releases (normally `main` and `master`).
    pub fn new(name: impl Into<String>, release_branches: &[String]) -> Self {
        let name = name.into();
        let is_release = release_branches.iter().any(|b| *b == name);

        BranchContext { name, is_release }
    }

    /// Check if releases from this branch may omit a qualifier
    pub fn is_release_branch(&self) -> bool {
        self.is_release
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Vec<String> {
        vec!["main".to_string(), "master".to_string()]
    }

    #[test]
    fn test_main_branch() {
        let branch = BranchContext::new("main", &defaults());
        assert!(branch.is_release_branch());
    }

    #[test]
    fn test_master_branch() {
        let branch = BranchContext::new("master", &defaults());
        assert!(branch.is_release);
    }

    #[test]
    fn test_feature_branch() {
        let branch = BranchContext::new("feature/login", &defaults());
        assert!(!branch.is_release_branch());
    }

    #[test]
    fn test_custom_release_branches() {
        let branches = vec!["trunk".to_string()];
        assert!(BranchContext::new("trunk", &branches).is_release_branch());
        assert!(!BranchContext::new("main", &branches).is_release_branch());
    }
}
