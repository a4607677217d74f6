//! Typed access to one collection
//!
//! Every mutation is read-modify-write of the whole array: load, change in
//! memory, write the full array back. Updates shallow-merge a patch over the
//! stored record: top-level fields present in the patch replace the stored
//! ones, everything else is kept.

use super::store::Store;
use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// An entity persisted in its own collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: PartialEq + fmt::Display + Send + Sync;

    /// Storage key of the collection
    const COLLECTION: &'static str;
    /// Human-readable entity name for errors
    const ENTITY: &'static str;

    fn id(&self) -> &Self::Id;
}

pub struct Collection<T> {
    store: Store,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Full collection, stored order
    pub async fn list(&self) -> Result<Vec<T>> {
        self.store.get_collection(T::COLLECTION).await
    }

    pub async fn find(&self, id: &T::Id) -> Result<Option<T>> {
        Ok(self.list().await?.into_iter().find(|item| item.id() == id))
    }

    /// Like [`find`](Self::find), but a missing id is an error
    pub async fn get(&self, id: &T::Id) -> Result<T> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(T::ENTITY, id))
    }

    /// Decode one stored record; `None` when it no longer fits `T`
    fn decode(record: &Value) -> Option<T> {
        T::deserialize(record).ok()
    }

    fn position(records: &[Value], id: &T::Id) -> Option<usize> {
        records
            .iter()
            .position(|record| Self::decode(record).map_or(false, |item| item.id() == id))
    }

    /// Insert at the front (most recent first)
    pub async fn prepend(&self, item: T) -> Result<T> {
        let mut records = self.store.get_records(T::COLLECTION).await?;
        records.insert(0, serde_json::to_value(&item)?);
        self.store.set_records(T::COLLECTION, &records).await?;

        tracing::debug!("Prepended {} {}", T::ENTITY, item.id());
        Ok(item)
    }

    /// Insert at the end
    pub async fn append(&self, item: T) -> Result<T> {
        let mut records = self.store.get_records(T::COLLECTION).await?;
        records.push(serde_json::to_value(&item)?);
        self.store.set_records(T::COLLECTION, &records).await?;

        tracing::debug!("Appended {} {}", T::ENTITY, item.id());
        Ok(item)
    }

    /// Apply `f` to the record with `id` and persist. NotFound when absent.
    pub async fn modify<F>(&self, id: &T::Id, f: F) -> Result<T>
    where
        F: FnOnce(&mut T) -> Result<()>,
    {
        let mut records = self.store.get_records(T::COLLECTION).await?;
        let index = Self::position(&records, id)
            .ok_or_else(|| AppError::not_found(T::ENTITY, id))?;

        let mut item = Self::decode(&records[index])
            .ok_or_else(|| AppError::not_found(T::ENTITY, id))?;
        f(&mut item)?;
        records[index] = serde_json::to_value(&item)?;

        self.store.set_records(T::COLLECTION, &records).await?;

        tracing::debug!("Updated {} {}", T::ENTITY, id);
        Ok(item)
    }

    /// Shallow-merge `patch` over the record with `id`. NotFound when absent.
    pub async fn merge<P: Serialize>(&self, id: &T::Id, patch: &P) -> Result<T> {
        self.modify(id, |item| {
            *item = shallow_merge(item, patch)?;
            Ok(())
        })
        .await
    }

    /// Drop the record with `id`. Returns whether anything was removed;
    /// removing an absent id is not an error.
    pub async fn remove(&self, id: &T::Id) -> Result<bool> {
        let mut records = self.store.get_records(T::COLLECTION).await?;
        let removed = match Self::position(&records, id) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        };

        if removed {
            self.store.set_records(T::COLLECTION, &records).await?;
        }

        tracing::debug!("Removed {} {} (present: {})", T::ENTITY, id, removed);
        Ok(removed)
    }

    /// Apply `f` to every readable record, persisting when any call returns
    /// true. Returns the number of changed records.
    pub async fn modify_each<F>(&self, mut f: F) -> Result<usize>
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut records = self.store.get_records(T::COLLECTION).await?;
        let mut changed = 0;

        for record in records.iter_mut() {
            let Some(mut item) = Self::decode(record) else {
                continue;
            };
            if f(&mut item) {
                *record = serde_json::to_value(&item)?;
                changed += 1;
            }
        }

        if changed > 0 {
            self.store.set_records(T::COLLECTION, &records).await?;
        }

        tracing::debug!("Updated {} {} records", changed, T::ENTITY);
        Ok(changed)
    }
}

/// Overlay the top-level fields of `patch` onto `record`
pub fn shallow_merge<T, P>(record: &T, patch: &P) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    P: Serialize,
{
    let mut base = serde_json::to_value(record)?;
    let patch = serde_json::to_value(patch)?;

    match (base.as_object_mut(), patch) {
        (Some(fields), Value::Object(changes)) => {
            for (key, value) in changes {
                fields.insert(key, value);
            }
        }
        _ => {
            return Err(AppError::InvalidInput(
                "patch and record must both be objects".to_string(),
            ))
        }
    }

    Ok(serde_json::from_value(base)?)
}
