//! Core identifier types for the resource dispatcher.

/// NodeName: unique name of a worker node within the fleet
pub type NodeName = String;

/// ResourceId: identifier of an external resource, unique per node only
pub type ResourceId = String;

/// ReservationKey: opaque token a holder presents to release its reservation
pub type ReservationKey = String;
