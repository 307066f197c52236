//! Arrangement synchronization
//!
//! Keeps each arrangement's order valid against the canonical group list.
//! Every function takes an arrangement by reference and returns a new one,
//! so a failed operation leaves the caller's value untouched. Arrangements
//! never share state: reconciling one never looks at another.
//!
//! Rules:
//! - a locked arrangement is rebuilt to exactly the canonical order, reusing
//!   entry ids for keys it already had
//! - an unlocked arrangement drops entries whose group disappeared, keeps the
//!   survivors in their relative order and appends new groups at the end in
//!   canonical order
//! - only unlocked arrangements accept insert/move/remove

use std::collections::HashSet;

use super::groups::Group;
use crate::error::{Result, SetlistError};
use crate::models::{Arrangement, EntryId, GroupKey, GroupRef};

/// Reconcile against canonical keys
///
/// New entries take their labels from the key text.
pub fn reconcile(canonical: &[GroupKey], arrangement: &Arrangement) -> Arrangement {
    reconcile_with(canonical, arrangement, |key| GroupRef::new(key.clone()))
}

/// Reconcile against derived groups
///
/// Same as [`reconcile`], but new entries copy labels from the group, which
/// keeps custom labels the key text cannot carry.
pub fn reconcile_groups(groups: &[Group], arrangement: &Arrangement) -> Arrangement {
    let canonical: Vec<GroupKey> = groups.iter().map(|g| g.key.clone()).collect();
    reconcile_with(&canonical, arrangement, |key| {
        match groups.iter().find(|g| &g.key == key) {
            Some(group) => GroupRef {
                entry_id: EntryId::generate(),
                group_key: group.key.clone(),
                label: group.label,
                custom_label: group.custom_label.clone(),
            },
            None => GroupRef::new(key.clone()),
        }
    })
}

fn reconcile_with<F>(canonical: &[GroupKey], arrangement: &Arrangement, make_ref: F) -> Arrangement
where
    F: Fn(&GroupKey) -> GroupRef,
{
    let order = if arrangement.locked {
        mirror_canonical(canonical, &arrangement.order, &make_ref)
    } else {
        merge_canonical(canonical, &arrangement.order, &make_ref)
    };

    if order != arrangement.order {
        log::debug!(
            "reconcile '{}': {} -> {} entries (locked={})",
            arrangement.id,
            arrangement.order.len(),
            order.len(),
            arrangement.locked
        );
    }

    Arrangement {
        order,
        ..arrangement.clone()
    }
}

/// Locked: exactly canonical, reusing the first unused entry per key
fn mirror_canonical<F>(canonical: &[GroupKey], existing: &[GroupRef], make_ref: &F) -> Vec<GroupRef>
where
    F: Fn(&GroupKey) -> GroupRef,
{
    let mut used = vec![false; existing.len()];

    canonical
        .iter()
        .map(|key| {
            let reusable = existing
                .iter()
                .enumerate()
                .find(|(i, entry)| !used[*i] && &entry.group_key == key);
            match reusable {
                Some((i, entry)) => {
                    used[i] = true;
                    entry.clone()
                }
                None => make_ref(key),
            }
        })
        .collect()
}

/// Unlocked: survivors in prior order, then missing keys in canonical order
fn merge_canonical<F>(canonical: &[GroupKey], existing: &[GroupRef], make_ref: &F) -> Vec<GroupRef>
where
    F: Fn(&GroupKey) -> GroupRef,
{
    let live: HashSet<&GroupKey> = canonical.iter().collect();

    let mut order: Vec<GroupRef> = existing
        .iter()
        .filter(|entry| live.contains(&entry.group_key))
        .cloned()
        .collect();

    let present: HashSet<GroupKey> = order.iter().map(|e| e.group_key.clone()).collect();
    let mut appended: HashSet<&GroupKey> = HashSet::new();
    for key in canonical {
        if !present.contains(key) && appended.insert(key) {
            order.push(make_ref(key));
        }
    }

    order
}

fn ensure_unlocked(arrangement: &Arrangement) -> Result<()> {
    if arrangement.locked {
        return Err(SetlistError::locked(arrangement.id.as_str()));
    }
    Ok(())
}

/// Insert a fresh entry for `group_key` at `index` (clamped to the end)
///
/// Duplicates are allowed; the new entry gets its own id.
pub fn insert_group_at(arrangement: &Arrangement, group_key: &GroupKey, index: usize) -> Result<Arrangement> {
    ensure_unlocked(arrangement)?;

    let mut next = arrangement.clone();
    let at = index.min(next.order.len());
    next.order.insert(at, GroupRef::new(group_key.clone()));
    Ok(next)
}

/// Move an entry: remove it, then reinsert at `new_index` clamped to the
/// shortened list
pub fn move_entry(arrangement: &Arrangement, entry_id: &EntryId, new_index: usize) -> Result<Arrangement> {
    ensure_unlocked(arrangement)?;

    let from = arrangement
        .position_of(entry_id)
        .ok_or_else(|| SetlistError::not_found("entry", entry_id.as_str()))?;

    let mut next = arrangement.clone();
    let entry = next.order.remove(from);
    let to = new_index.min(next.order.len());
    next.order.insert(to, entry);
    Ok(next)
}

/// Remove one entry; the group itself and other arrangements are unaffected
pub fn remove_entry(arrangement: &Arrangement, entry_id: &EntryId) -> Result<Arrangement> {
    ensure_unlocked(arrangement)?;

    let at = arrangement
        .position_of(entry_id)
        .ok_or_else(|| SetlistError::not_found("entry", entry_id.as_str()))?;

    let mut next = arrangement.clone();
    next.order.remove(at);
    Ok(next)
}
