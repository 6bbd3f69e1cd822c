pub mod error;
pub mod external;
pub mod location;
pub mod publisher;
pub mod store;

pub use error::HostError;
pub use external::{ExternalResolver, ExternalResolverFactory, InMemoryExternalResolver};
pub use location::{LocationHandle, LocationResolver, StaticLocationResolver};
pub use publisher::{PlacementRequest, PublishCall, Publisher, RecordingPublisher};
pub use store::{BinaryStream, InMemoryObjectStore, ObjectStore, SharedBinaryData};
