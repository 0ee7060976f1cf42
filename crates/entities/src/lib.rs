pub mod collection_item;
