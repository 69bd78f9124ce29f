use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};
use time::{Date, OffsetDateTime};

use crate::entities::transactions;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub anggaran_id: i32,
    pub jenis_transaksi: String,
    pub jumlah: i64,
    pub keterangan: Option<String>,
    pub tanggal: Date,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionChanges {
    pub anggaran_id: Option<i32>,
    pub jenis_transaksi: Option<String>,
    pub jumlah: Option<i64>,
    pub keterangan: Option<String>,
    pub tanggal: Option<Date>,
}

fn transaction_not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Transaction, "Transaksi tidak ditemukan")
}

pub async fn list_transactions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<transactions::Model>, DomainError> {
    Ok(transactions::Entity::find()
        .order_by_asc(transactions::Column::Id)
        .all(conn)
        .await?)
}

pub async fn get_transaction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<transactions::Model, DomainError> {
    transactions::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(transaction_not_found)
}

pub async fn create_transaction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewTransaction,
) -> Result<transactions::Model, DomainError> {
    let now = OffsetDateTime::now_utc();
    Ok(transactions::ActiveModel {
        id: NotSet,
        anggaran_id: Set(new.anggaran_id),
        jenis_transaksi: Set(new.jenis_transaksi),
        jumlah: Set(new.jumlah),
        keterangan: Set(new.keterangan),
        tanggal: Set(new.tanggal),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?)
}

/// Apply `changes` and bump `updated_at`.
pub async fn update_transaction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
    changes: TransactionChanges,
) -> Result<transactions::Model, DomainError> {
    let existing = get_transaction(conn, id).await?;

    let mut active: transactions::ActiveModel = existing.into();
    if let Some(v) = changes.anggaran_id {
        active.anggaran_id = Set(v);
    }
    if let Some(v) = changes.jenis_transaksi {
        active.jenis_transaksi = Set(v);
    }
    if let Some(v) = changes.jumlah {
        active.jumlah = Set(v);
    }
    if let Some(v) = changes.keterangan {
        active.keterangan = Set(Some(v));
    }
    if let Some(v) = changes.tanggal {
        active.tanggal = Set(v);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    Ok(active.update(conn).await?)
}

pub async fn delete_transaction<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<(), DomainError> {
    let result = transactions::Entity::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(transaction_not_found());
    }
    Ok(())
}
