use reqwest::Method;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url }
    }

    /// Create a GET request
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// GET `base` with `param` set to `payload`.
    ///
    /// Other query parameters are kept in place; the parameter is appended
    /// when the base URL does not carry it.
    pub fn with_param(base: &Url, param: &str, payload: &str) -> Self {
        let mut url = base.clone();

        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                if k == param {
                    (k.to_string(), payload.to_string())
                } else {
                    (k.to_string(), v.to_string())
                }
            })
            .collect();

        if !pairs.iter().any(|(k, _)| k == param) {
            pairs.push((param.to_string(), payload.to_string()));
        }

        url.query_pairs_mut().clear().extend_pairs(pairs);

        Self::get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_param_appends_missing_parameter() {
        let base = Url::parse("http://testphp.vulnweb.com/artists.php").unwrap();
        let req = HttpRequest::with_param(&base, "artist", "1 AND IF(1=1, SLEEP(2),0)");

        let pairs: Vec<_> = req.url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![("artist".to_string(), "1 AND IF(1=1, SLEEP(2),0)".to_string())]
        );
        assert_eq!(req.method, Method::GET);
    }

    #[test]
    fn test_with_param_replaces_existing_value() {
        let base = Url::parse("http://localhost/page.php?cat=2&artist=1").unwrap();
        let req = HttpRequest::with_param(&base, "artist", "x'y");

        let pairs: Vec<_> = req.url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("cat".to_string(), "2".to_string()));
        assert_eq!(pairs[1], ("artist".to_string(), "x'y".to_string()));
    }
}
