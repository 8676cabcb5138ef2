use percent_encoding::percent_decode_str;
use url::Url;

use crate::model::Resource;

/// A resource attachment rewritten to point at the mirrored copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLink {
    pub href: Url,
    /// Percent-decoded original filename.
    pub label: String,
    pub description: String,
}

/// Derives the mirrored location of a resource.
///
/// With a digest the mirror name is `<digest>.<extension>`, otherwise it is the
/// original filename; both are lower-cased and resolved against `base`.
pub fn resource_link(resource: &Resource, base: &Url) -> Result<ResourceLink, url::ParseError> {
    let filename = file_name(&resource.uri);
    let digest = resource
        .digest
        .as_deref()
        .filter(|digest| !digest.is_empty());

    let mirrored = match digest {
        Some(digest) => match extension(filename) {
            Some(ext) => format!("{}.{}", digest.to_lowercase(), ext.to_lowercase()),
            None => digest.to_lowercase(),
        },
        None => filename.to_lowercase(),
    };

    // "./" keeps a name containing ':' from being read as a scheme.
    let href = base.join(&format!("./{mirrored}"))?;
    let label = percent_decode_str(filename).decode_utf8_lossy().into_owned();

    Ok(ResourceLink {
        href,
        label,
        description: resource.description.clone(),
    })
}

/// Last path segment of `uri`, ignoring any query or fragment.
pub(crate) fn file_name(uri: &str) -> &str {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    path.rsplit('/').next().unwrap_or(path)
}

fn extension(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then_some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_path_query_and_fragment() {
        assert_eq!(file_name("http://x/a/b/Report.PDF?v=1#p2"), "Report.PDF");
        assert_eq!(file_name("Report.PDF"), "Report.PDF");
        assert_eq!(file_name("http://x/dir/"), "");
    }

    #[test]
    fn extension_ignores_dotfiles_and_trailing_dots() {
        assert_eq!(extension("map.tar.gz"), Some("gz"));
        assert_eq!(extension(".hidden"), None);
        assert_eq!(extension("name."), None);
        assert_eq!(extension("plain"), None);
    }
}
