use url::Url;

/// Single-target guard: every probe must hit the host the session started on.
#[derive(Debug, Clone)]
pub struct Scope {
    allowed_host: String,
}

impl Scope {
    pub fn new(target: &Url) -> anyhow::Result<Self> {
        let host = target
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid target host"))?;

        Ok(Self {
            allowed_host: host.to_string(),
        })
    }

    pub fn is_in_scope(&self, url: &Url) -> bool {
        url.host_str()
            .map(|h| h == self.allowed_host)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_pins_target_host() {
        let target = Url::parse("http://testphp.vulnweb.com/artists.php").unwrap();
        let scope = Scope::new(&target).unwrap();

        assert!(scope.is_in_scope(&Url::parse("http://testphp.vulnweb.com/x?a=1").unwrap()));
        assert!(!scope.is_in_scope(&Url::parse("http://example.com/").unwrap()));
    }
}
