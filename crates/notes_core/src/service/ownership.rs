//! Ownership guard shared by every checklist and table mutation.
//!
//! The guard is a plain function composed explicitly at each call site, so
//! every authorization check is visible where the mutation happens.

use crate::model::note::NoteId;
use crate::model::user::UserId;
use crate::repo::note_repo::NoteRepository;
use crate::repo::Entity;
use crate::service::{ServiceError, ServiceResult};

/// Verifies that `user_id` owns `note_id`.
///
/// # Errors
/// - `NotFound(Note)` when the note is missing or owned by someone else.
/// - `Storage` when the lookup itself fails; storage errors are never masked
///   as not-found.
pub fn verify_note_ownership<N: NoteRepository>(
    notes: &N,
    note_id: NoteId,
    user_id: UserId,
) -> ServiceResult<()> {
    match notes.get_note(note_id, user_id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::NotFound(Entity::Note(note_id))),
    }
}

#[cfg(test)]
mod tests {
    use super::verify_note_ownership;
    use crate::model::note::{Note, NoteDraft, NoteId};
    use crate::model::style::TextStyle;
    use crate::model::user::UserId;
    use crate::repo::note_repo::NoteRepository;
    use crate::repo::{Entity, RepoError, RepoResult};
    use crate::service::ServiceError;

    /// Holds one note owned by user 1, or fails every lookup.
    struct FakeNotes {
        broken: bool,
    }

    impl NoteRepository for FakeNotes {
        fn create_note(&self, _owner: UserId, _draft: &NoteDraft) -> RepoResult<Note> {
            unimplemented!("not used by the guard")
        }

        fn get_note(&self, id: NoteId, owner: UserId) -> RepoResult<Option<Note>> {
            if self.broken {
                return Err(RepoError::InvalidData("disk on fire".to_string()));
            }
            Ok((id == 10 && owner == 1).then(|| Note {
                id,
                title: "t".to_string(),
                content: "c".to_string(),
                style: TextStyle::Normal,
                user_id: owner,
                created_at: 0,
                updated_at: 0,
            }))
        }

        fn list_notes(&self, _owner: UserId) -> RepoResult<Vec<Note>> {
            unimplemented!("not used by the guard")
        }

        fn update_note(&self, _id: NoteId, _owner: UserId, _draft: &NoteDraft) -> RepoResult<Note> {
            unimplemented!("not used by the guard")
        }

        fn delete_note(&self, _id: NoteId, _owner: UserId) -> RepoResult<()> {
            unimplemented!("not used by the guard")
        }
    }

    #[test]
    fn owner_passes() {
        let notes = FakeNotes { broken: false };
        assert!(verify_note_ownership(&notes, 10, 1).is_ok());
    }

    #[test]
    fn foreign_and_missing_notes_look_the_same() {
        let notes = FakeNotes { broken: false };
        let foreign = verify_note_ownership(&notes, 10, 2).unwrap_err();
        let missing = verify_note_ownership(&notes, 11, 1).unwrap_err();
        assert!(matches!(foreign, ServiceError::NotFound(Entity::Note(10))));
        assert!(matches!(missing, ServiceError::NotFound(Entity::Note(11))));
    }

    #[test]
    fn storage_failures_are_not_masked_as_not_found() {
        let notes = FakeNotes { broken: true };
        let err = verify_note_ownership(&notes, 10, 1).unwrap_err();
        assert_eq!(err.kind(), "storage_failure");
    }

    #[test]
    fn conceal_keeps_storage_errors_and_relabels_not_found() {
        let concealed = ServiceError::NotFound(Entity::Note(10)).conceal_as(Entity::Table(3));
        assert!(matches!(concealed, ServiceError::NotFound(Entity::Table(3))));

        let storage = ServiceError::Storage(RepoError::InvalidData("x".to_string()))
            .conceal_as(Entity::Table(3));
        assert_eq!(storage.kind(), "storage_failure");
    }
}
