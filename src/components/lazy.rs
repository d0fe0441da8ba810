//! Lazily mounted list entries

use anyhow::Result;
use serde::Serialize;

use crate::config::LazyLoadConfig;
use crate::content::PostRecord;

/// One list entry, shipped as inert markup and mounted by the client script
/// the first time it comes within `offset` pixels of the viewport
#[derive(Debug, Clone, Serialize)]
pub struct LazyUnit {
    pub key: usize,
    pub height: u32,
    pub offset: u32,
    pub html: String,
}

/// Wrap each record's rendering in a lazy unit, in order.
///
/// Rendering happens as the iterator is driven; a failed render ends up as
/// an `Err` item for the caller to propagate.
pub fn lazy_units<'a, I, F>(
    records: I,
    config: &'a LazyLoadConfig,
    mut render: F,
) -> impl Iterator<Item = Result<LazyUnit>> + 'a
where
    I: IntoIterator<Item = &'a PostRecord>,
    I::IntoIter: 'a,
    F: FnMut(&PostRecord) -> Result<String> + 'a,
{
    records
        .into_iter()
        .enumerate()
        .map(move |(key, record)| {
            Ok(LazyUnit {
                key,
                height: config.height,
                offset: config.offset,
                html: render(record)?,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_keep_order_and_geometry() {
        let mut a = PostRecord::default();
        a.frontmatter.title = "A".to_string();
        let mut b = PostRecord::default();
        b.frontmatter.title = "B".to_string();
        let records = vec![&a, &b];

        let config = LazyLoadConfig {
            height: 300,
            offset: 100,
        };
        let units: Vec<LazyUnit> = lazy_units(records, &config, |r| Ok(r.frontmatter.title.clone()))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].key, 0);
        assert_eq!(units[0].html, "A");
        assert_eq!(units[1].html, "B");
        assert_eq!(units[1].height, 300);
        assert_eq!(units[1].offset, 100);
    }

    #[test]
    fn test_render_error_surfaces() {
        let record = PostRecord::default();
        let config = LazyLoadConfig::default();
        let result: Result<Vec<LazyUnit>> =
            lazy_units(vec![&record], &config, |_| anyhow::bail!("boom")).collect();
        assert!(result.is_err());
    }
}
