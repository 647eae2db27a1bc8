mod record;
mod response;

pub use record::{CollinsData, CollinsExample, NoteFields, WordRecord};
pub use response::{ApiResponse, WordNotesResponse};
