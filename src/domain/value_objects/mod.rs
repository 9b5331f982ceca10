mod bucket_name;
mod object_key;
mod table_name;

pub use bucket_name::BucketName;
pub use object_key::ObjectKey;
pub use table_name::TableName;
