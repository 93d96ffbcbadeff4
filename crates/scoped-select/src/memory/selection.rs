use crate::region::Region;

/// Sort and merge a selection set.
///
/// Overlapping regions merge into their union, and a caret touching a region is absorbed by
/// it. Two non-empty regions that only touch stay separate.
pub(crate) fn normalize_selections(mut regions: Vec<Region>) -> Vec<Region> {
    regions.sort();

    let mut merged: Vec<Region> = Vec::with_capacity(regions.len());
    for region in regions {
        let Some(last) = merged.last_mut() else {
            merged.push(region);
            continue;
        };

        let overlaps = region.begin() < last.end();
        let touches_caret =
            region.begin() == last.end() && (region.is_empty() || last.is_empty());
        if overlaps || touches_caret || region == *last {
            *last = last.cover(region);
        } else {
            merged.push(region);
        }
    }
    merged
}

/// Remove `removed` from every region of the set.
pub(crate) fn subtract_region(selections: &[Region], removed: Region) -> Vec<Region> {
    let mut out = Vec::with_capacity(selections.len() + 1);
    for &sel in selections {
        if sel.is_empty() {
            let inside = removed.begin() < sel.begin() && sel.begin() < removed.end();
            if !inside {
                out.push(sel);
            }
            continue;
        }

        if !sel.intersects(removed) {
            out.push(sel);
            continue;
        }
        if sel.begin() < removed.begin() {
            out.push(Region::new(sel.begin(), removed.begin()));
        }
        if removed.end() < sel.end() {
            out.push(Region::new(removed.end(), sel.end()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_merges_overlaps_and_carets() {
        let merged = normalize_selections(vec![
            Region::new(8, 11),
            Region::caret(1),
            Region::new(0, 3),
            Region::caret(11),
            Region::new(11, 14),
            Region::new(20, 25),
            Region::new(22, 30),
        ]);
        assert_eq!(
            merged,
            vec![
                Region::new(0, 3),
                Region::new(8, 11),
                Region::new(11, 14),
                Region::new(20, 30),
            ]
        );
    }

    #[test]
    fn test_subtract_splits_and_drops() {
        let sels = vec![Region::new(0, 10), Region::new(12, 15), Region::caret(20)];
        assert_eq!(
            subtract_region(&sels, Region::new(3, 5)),
            vec![
                Region::new(0, 3),
                Region::new(5, 10),
                Region::new(12, 15),
                Region::caret(20),
            ]
        );
        assert_eq!(
            subtract_region(&sels, Region::new(12, 15)),
            vec![Region::new(0, 10), Region::caret(20)]
        );
        assert_eq!(
            subtract_region(&sels, Region::new(18, 22)),
            vec![Region::new(0, 10), Region::new(12, 15)]
        );
    }
}
