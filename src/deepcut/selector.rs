use std::collections::HashSet;

use rand::Rng;

use crate::{
    Res,
    spotify::SpotifyApi,
    types::{SelectionPolicy, Track},
};

use super::expander::expand_album;

/// Track ids that may no longer be selected during one run.
///
/// Seeded with the source playlist's tracks. Ids are never removed.
#[derive(Debug, Clone, Default)]
pub struct ForbiddenSet {
    ids: HashSet<String>,
}

impl ForbiddenSet {
    pub fn seeded(tracks: &[Track]) -> Self {
        Self {
            ids: tracks.iter().map(|t| t.id.clone()).collect(),
        }
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.ids.contains(track_id)
    }

    /// Returns `false` if the id was already forbidden.
    pub fn insert(&mut self, track_id: &str) -> bool {
        self.ids.insert(track_id.to_string())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Album tracks not currently forbidden, in album order.
pub fn acceptable_tracks<'a>(
    album_tracks: &'a [Track],
    forbidden: &ForbiddenSet,
) -> Vec<&'a Track> {
    album_tracks
        .iter()
        .filter(|track| !forbidden.contains(&track.id))
        .collect()
}

/// Applies `policy` to one album's tracklist.
///
/// - `AllButOriginal` returns every acceptable track and leaves `forbidden`
///   untouched, so the same track can come back from a later album expansion.
/// - `OneTrackPerTrack` draws one acceptable track uniformly at random and
///   forbids it; an album with nothing acceptable contributes nothing.
pub fn pick_from_album<R>(
    album_tracks: &[Track],
    policy: SelectionPolicy,
    forbidden: &mut ForbiddenSet,
    rng: &mut R,
) -> Vec<Track>
where
    R: Rng + ?Sized,
{
    let acceptable = acceptable_tracks(album_tracks, forbidden);

    match policy {
        SelectionPolicy::AllButOriginal => acceptable.into_iter().cloned().collect(),
        SelectionPolicy::OneTrackPerTrack => {
            if acceptable.is_empty() {
                return Vec::new();
            }
            let pick = acceptable[rng.random_range(0..acceptable.len())].clone();
            forbidden.insert(&pick.id);
            vec![pick]
        }
    }
}

/// Chooses the deep cut tracks for a list of original tracks.
///
/// Walks `originals` in order, expands each one's album and applies
/// `policy` against a [`ForbiddenSet`] seeded with every original. The
/// result may be shorter than `originals`, or empty.
///
/// Iterations run strictly one after another: under `OneTrackPerTrack` each
/// draw depends on what earlier iterations forbade.
///
/// # Errors
///
/// A failed album fetch aborts the selection and nothing selected so far
/// is returned.
pub async fn select_tracks<C, R>(
    api: &C,
    originals: &[Track],
    policy: SelectionPolicy,
    rng: &mut R,
) -> Res<Vec<Track>>
where
    C: SpotifyApi + ?Sized,
    R: Rng + ?Sized,
{
    let mut forbidden = ForbiddenSet::seeded(originals);
    let mut final_tracks = Vec::new();

    for (i, original) in originals.iter().enumerate() {
        let album = expand_album(api, original).await?;
        let picked = pick_from_album(&album.tracks, policy, &mut forbidden, rng);
        log::debug!(
            "Album {}/{} ({}): {} tracks selected",
            i + 1,
            originals.len(),
            album.id,
            picked.len()
        );
        final_tracks.extend(picked);
    }

    log::info!(
        "Selected {} tracks from {} originals using {}",
        final_tracks.len(),
        originals.len(),
        policy
    );

    Ok(final_tracks)
}
